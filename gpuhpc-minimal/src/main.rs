//! Minimal GPU classification tool

use std::process;

fn main() {
    let Some(path) = gpuhpc::device::find_gpu_device() else {
        eprintln!("no_gpu");
        process::exit(1);
    };

    match gpuhpc::describe_device(&path) {
        Ok(info) if info.supported => {
            println!("{} {} (id {:#x})", info.vendor, info.generation, info.hardware_id);
        }
        Ok(info) => {
            eprintln!("unknown_gpu {:#x}", info.hardware_id);
            process::exit(2);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(3);
        }
    }
}
