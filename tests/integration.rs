#[cfg(test)]
mod integration_tests {
    use std::alloc::Layout;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::ptr::NonNull;
    use std::rc::Rc;

    use gpuhpc::{
        AdrenoCounter, AdrenoSeries, ContextState, Counter, CounterDevice, CounterSlot, Generation, HostAllocator,
        HpcError, HpcResult, MaliCounter, MaliLayout, SamplingContext, SystemAllocator,
    };
    use pretty_assertions::assert_eq;

    /// Calls observed by a [`ScriptedDevice`]
    #[derive(Debug, Default)]
    struct CallLog {
        activations: Vec<CounterSlot>,
        deactivations: Vec<CounterSlot>,
        reads: usize,
        closes: usize,
    }

    /// In-memory device replaying scripted raw readings
    struct ScriptedDevice {
        hardware_id: u32,
        readings: VecDeque<Vec<u64>>,
        log: Rc<RefCell<CallLog>>,
    }

    impl ScriptedDevice {
        fn new(hardware_id: u32, readings: &[&[u64]]) -> (Self, Rc<RefCell<CallLog>>) {
            let log = Rc::new(RefCell::new(CallLog::default()));
            let device = Self {
                hardware_id,
                readings: readings.iter().map(|r| r.to_vec()).collect(),
                log: Rc::clone(&log),
            };
            (device, log)
        }
    }

    impl CounterDevice for ScriptedDevice {
        fn hardware_id(&self) -> HpcResult<u32> {
            Ok(self.hardware_id)
        }

        fn activate(&mut self, slot: CounterSlot) -> HpcResult<()> {
            self.log.borrow_mut().activations.push(slot);
            Ok(())
        }

        fn deactivate(&mut self, slot: CounterSlot) -> HpcResult<()> {
            self.log.borrow_mut().deactivations.push(slot);
            Ok(())
        }

        fn read(&mut self, slots: &[CounterSlot], values: &mut [u64]) -> HpcResult<()> {
            self.log.borrow_mut().reads += 1;
            let reading = self.readings.pop_front().ok_or_else(|| HpcError::IoctlFailure {
                request: "SCRIPTED_READ",
                source: std::io::Error::from(std::io::ErrorKind::UnexpectedEof),
            })?;
            assert_eq!(reading.len(), slots.len());
            values.copy_from_slice(&reading);
            Ok(())
        }

        fn close(self) -> HpcResult<()> {
            self.log.borrow_mut().closes += 1;
            Ok(())
        }
    }

    fn opener(device: ScriptedDevice) -> impl FnOnce() -> HpcResult<ScriptedDevice> {
        move || Ok(device)
    }

    /// Allocator tracking outstanding blocks
    #[derive(Default)]
    struct CountingAllocator {
        live: Cell<usize>,
        allocations: Cell<usize>,
    }

    impl HostAllocator for CountingAllocator {
        fn allocate(&self, layout: Layout) -> Option<NonNull<u8>> {
            self.live.set(self.live.get() + 1);
            self.allocations.set(self.allocations.get() + 1);
            SystemAllocator.allocate(layout)
        }

        unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
            self.live.set(self.live.get() - 1);
            SystemAllocator.deallocate(ptr, layout)
        }
    }

    #[test]
    fn test_scenario_a_adreno_classification() {
        assert_eq!(AdrenoSeries::classify(610), AdrenoSeries::A6xx);
        assert_eq!(AdrenoSeries::classify(0x205), AdrenoSeries::A5xx);
        assert_eq!(AdrenoSeries::classify(0x999), AdrenoSeries::Unknown);
        assert_eq!(gpuhpc::classify_adreno(702), AdrenoSeries::A6xx);
    }

    #[test]
    fn test_scenario_b_deltas() {
        let allocator = CountingAllocator::default();
        let (device, log) = ScriptedDevice::new(640, &[&[10, 100], &[15, 140], &[15, 200]]);
        let counters = [AdrenoCounter::CpAlwaysCount, AdrenoCounter::RbBusyCycles];

        let mut ctx = SamplingContext::create(opener(device), &counters, &allocator).unwrap();
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.previous_values().len(), 2);
        assert_eq!(log.borrow().activations.len(), 2);

        ctx.start().unwrap();
        assert_eq!(ctx.state(), ContextState::Active);
        assert_eq!(log.borrow().activations.len(), 4);

        let mut out = [0u64; 2];
        ctx.query(&mut out).unwrap();
        assert_eq!(out, [5, 40]);
        assert_eq!(ctx.previous_values(), &[15, 140]);

        ctx.query(&mut out).unwrap();
        assert_eq!(out, [0, 60]);

        ctx.destroy().unwrap();
        assert_eq!(log.borrow().reads, 3);
        assert_eq!(log.borrow().closes, 1);
        assert_eq!(allocator.live.get(), 0);
    }

    #[test]
    fn test_scenario_c_unknown_device() {
        let allocator = CountingAllocator::default();
        let (device, log) = ScriptedDevice::new(0x999, &[]);

        let result = SamplingContext::create(opener(device), &[AdrenoCounter::CpAlwaysCount], &allocator);
        assert!(matches!(result, Err(HpcError::UnknownDevice { hardware_id: 0x999 })));
        assert!(log.borrow().activations.is_empty());
        assert_eq!(log.borrow().closes, 1);
        assert_eq!(allocator.live.get(), 0);
    }

    #[test]
    fn test_stop_keeps_previous_values() {
        let (device, log) = ScriptedDevice::new(530, &[&[3], &[9]]);
        let counters = [AdrenoCounter::SpBusyCycles];

        let mut ctx = SamplingContext::create(opener(device), &counters, SystemAllocator).unwrap();
        ctx.start().unwrap();
        ctx.stop().unwrap();
        ctx.stop().unwrap();
        assert_eq!(log.borrow().deactivations.len(), 1);
        assert_eq!(ctx.previous_values(), &[3]);

        // Querying while idle still reports against the last reading.
        assert_eq!(ctx.query_vec().unwrap(), vec![6]);
        assert_eq!(ctx.state(), ContextState::Idle);
    }

    #[test]
    fn test_mali_layout_dispatch() {
        assert_eq!(MaliLayout::classify(0x9005), MaliLayout::classify(0x9002));
        assert_eq!(gpuhpc::classify_mali(0x0880), MaliLayout::T88x);
        assert_ne!(gpuhpc::classify_mali(0x0880), gpuhpc::classify_mali(0x9005));

        let (midgard, _) = ScriptedDevice::new(0x0880, &[]);
        let ctx = SamplingContext::create(opener(midgard), &[MaliCounter::TilerTriangles], SystemAllocator).unwrap();
        assert_eq!(ctx.slots(), &[CounterSlot::new(1, 4)]);

        let (valhall, _) = ScriptedDevice::new(0x9002, &[]);
        let ctx = SamplingContext::create(opener(valhall), &[MaliCounter::TilerTriangles], SystemAllocator).unwrap();
        assert_eq!(ctx.slots(), &[CounterSlot::new(1, 6)]);
    }

    #[test]
    fn test_every_common_adreno_counter_encodes_on_a6xx() {
        for counter in AdrenoCounter::ALL {
            let slot = counter.encode(AdrenoSeries::A6xx).unwrap();
            assert_eq!(slot.group_id, counter.group());
        }
    }

    #[test]
    fn test_counter_names_round_trip() {
        let counter: AdrenoCounter = "sp_busy_cycles".parse().unwrap();
        assert_eq!(counter, AdrenoCounter::SpBusyCycles);
        assert_eq!(counter.name(), "SP_BUSY_CYCLES");
        assert!("NOT_A_COUNTER".parse::<MaliCounter>().is_err());
    }

    #[test]
    fn test_library_surface() {
        assert!(!gpuhpc::version().is_empty());
        let _ = gpuhpc::is_supported();
        let _ = gpuhpc::scan_devices();
    }
}
