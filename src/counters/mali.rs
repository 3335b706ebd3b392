//! ARM Mali counters
//!
//! A logical id is `(block << 8) | index` where block 0 is the job manager,
//! 1 the tiler, 2 the shader cores and 3 the memory system. Tables are
//! generated from the vendor counter databases.

use std::borrow::Cow;

use super::{counter_table, unsupported, Counter, CounterSlot};
use crate::error::HpcResult;
use crate::mappings::{MaliFamily, MaliLayout};

/// Counter block ids of the Mali hardware counter dump
pub mod block {
    /// Job manager (or command stream front-end)
    pub const JOB_MANAGER: u32 = 0;
    /// Tiler
    pub const TILER: u32 = 1;
    /// Shader core, one instance per core
    pub const SHADER_CORE: u32 = 2;
    /// Memory system, one instance per L2 slice
    pub const MEMORY: u32 = 3;
}

macro_rules! mali_common_table {
    ( $( $variant:ident = $hw_name:literal, $midgard:literal => $bifrost_valhall:literal; )* ) => {
        counter_table! {
            /// Counters available on every known Mali layout
            ///
            /// The logical id is the Midgard numbering; Bifrost and Valhall
            /// layouts translate it through their own table.
            pub enum MaliCounter {
                $( $variant = $hw_name, $midgard; )*
            }
        }

        impl MaliCounter {
            /// Packed `(block << 8) | index` of this counter on `family`
            pub fn packed_for(self, family: MaliFamily) -> u32 {
                match family {
                    MaliFamily::Midgard => self.raw(),
                    MaliFamily::Bifrost | MaliFamily::Valhall => match self {
                        $( MaliCounter::$variant => $bifrost_valhall, )*
                    },
                }
            }
        }
    };
}

mali_common_table! {
    // Job manager
    JobManagerMessagesSent     = "JOB_MANAGER_MESSAGES_SENT",       4 => 4;
    JobManagerMessagesReceived = "JOB_MANAGER_MESSAGES_RECEIVED",   5 => 5;
    JobManagerGpuActive        = "JOB_MANAGER_GPU_ACTIVE",          6 => 6;
    JobManagerIrqActive        = "JOB_MANAGER_IRQ_ACTIVE",          7 => 7;
    JobManagerJs0Jobs          = "JOB_MANAGER_JS0_JOBS",            8 => 8;
    JobManagerJs0Tasks         = "JOB_MANAGER_JS0_TASKS",           9 => 9;
    JobManagerJs0Active        = "JOB_MANAGER_JS0_ACTIVE",          10 => 10;
    JobManagerJs0WaitRead      = "JOB_MANAGER_JS0_WAIT_READ",       12 => 12;
    JobManagerJs0WaitIssue     = "JOB_MANAGER_JS0_WAIT_ISSUE",      13 => 13;
    JobManagerJs0WaitDepend    = "JOB_MANAGER_JS0_WAIT_DEPEND",     14 => 14;
    JobManagerJs0WaitFinish    = "JOB_MANAGER_JS0_WAIT_FINISH",     15 => 15;
    JobManagerJs1Jobs          = "JOB_MANAGER_JS1_JOBS",            16 => 16;
    JobManagerJs1Tasks         = "JOB_MANAGER_JS1_TASKS",           17 => 17;
    JobManagerJs1Active        = "JOB_MANAGER_JS1_ACTIVE",          18 => 18;
    JobManagerJs1WaitRead      = "JOB_MANAGER_JS1_WAIT_READ",       20 => 20;
    JobManagerJs1WaitIssue     = "JOB_MANAGER_JS1_WAIT_ISSUE",      21 => 21;
    JobManagerJs1WaitDepend    = "JOB_MANAGER_JS1_WAIT_DEPEND",     22 => 22;
    JobManagerJs1WaitFinish    = "JOB_MANAGER_JS1_WAIT_FINISH",     23 => 23;
    JobManagerJs2Jobs          = "JOB_MANAGER_JS2_JOBS",            24 => 24;
    JobManagerJs2Tasks         = "JOB_MANAGER_JS2_TASKS",           25 => 25;
    JobManagerJs2Active        = "JOB_MANAGER_JS2_ACTIVE",          26 => 26;
    JobManagerJs2WaitRead      = "JOB_MANAGER_JS2_WAIT_READ",       28 => 28;
    JobManagerJs2WaitIssue     = "JOB_MANAGER_JS2_WAIT_ISSUE",      29 => 29;
    JobManagerJs2WaitDepend    = "JOB_MANAGER_JS2_WAIT_DEPEND",     30 => 30;
    JobManagerJs2WaitFinish    = "JOB_MANAGER_JS2_WAIT_FINISH",     31 => 31;

    // Tiler
    TilerJobsProcessed         = "TILER_JOBS_PROCESSED",            259 => 261;
    TilerTriangles             = "TILER_TRIANGLES",                 260 => 262;
    TilerPoints                = "TILER_POINTS",                    263 => 264;
    TilerLines                 = "TILER_LINES",                     264 => 263;
    TilerFrontFacing           = "TILER_FRONT_FACING",              265 => 265;
    TilerBackFacing            = "TILER_BACK_FACING",               266 => 266;
    TilerPrimVisible           = "TILER_PRIM_VISIBLE",              267 => 267;
    TilerPrimCulled            = "TILER_PRIM_CULLED",               268 => 268;
    TilerPrimClipped           = "TILER_PRIM_CLIPPED",              269 => 269;

    // Shader core
    ShaderCoreFragActive       = "SHADER_CORE_FRAG_ACTIVE",         516 => 516;
    ShaderCoreFragQuadsRast    = "SHADER_CORE_FRAG_QUADS_RAST",     526 => 523;
    ShaderCoreFragQuadsEzsTest = "SHADER_CORE_FRAG_QUADS_EZS_TEST", 527 => 524;
    ShaderCoreFragTransElim    = "SHADER_CORE_FRAG_TRANS_ELIM",     533 => 531;
    ShaderCoreComputeActive    = "SHADER_CORE_COMPUTE_ACTIVE",      534 => 534;
    ShaderCoreComputeTasks     = "SHADER_CORE_COMPUTE_TASKS",       535 => 535;

    // Memory system
    MemoryMmuRequests          = "MEMORY_MMU_REQUESTS",             777 => 772;
    MemoryL2ExtWriteBeats      = "MEMORY_L2_EXT_WRITE_BEATS",       798 => 815;
    MemoryL2ExtReadBeats       = "MEMORY_L2_EXT_READ_BEATS",        799 => 800;
    MemoryL2AnyLookup          = "MEMORY_L2_ANY_LOOKUP",            800 => 793;
    MemoryL2ReadLookup         = "MEMORY_L2_READ_LOOKUP",           801 => 794;
    MemoryL2WriteLookup        = "MEMORY_L2_WRITE_LOOKUP",          807 => 795;
    MemoryL2ExtRead            = "MEMORY_L2_EXT_READ",              816 => 797;
    MemoryL2ExtWrite           = "MEMORY_L2_EXT_WRITE",             818 => 810;
    MemoryL2ExtArStall         = "MEMORY_L2_EXT_AR_STALL",          822 => 801;
    MemoryL2ExtWStall          = "MEMORY_L2_EXT_W_STALL",           826 => 816;
}

counter_table! {
    /// Counters of the Bifrost layouts (Mali-G31 through Mali-G76)
    pub enum MaliBifrostCounter {
        // Job manager
        JobManagerMessagesSent        = "JOB_MANAGER_MESSAGES_SENT",          4;
        JobManagerMessagesReceived    = "JOB_MANAGER_MESSAGES_RECEIVED",      5;
        JobManagerGpuActive           = "JOB_MANAGER_GPU_ACTIVE",             6;
        JobManagerIrqActive           = "JOB_MANAGER_IRQ_ACTIVE",             7;
        JobManagerJs0Jobs             = "JOB_MANAGER_JS0_JOBS",               8;
        JobManagerJs0Tasks            = "JOB_MANAGER_JS0_TASKS",              9;
        JobManagerJs0Active           = "JOB_MANAGER_JS0_ACTIVE",             10;
        JobManagerJs0WaitRead         = "JOB_MANAGER_JS0_WAIT_READ",          12;
        JobManagerJs0WaitIssue        = "JOB_MANAGER_JS0_WAIT_ISSUE",         13;
        JobManagerJs0WaitDepend       = "JOB_MANAGER_JS0_WAIT_DEPEND",        14;
        JobManagerJs0WaitFinish       = "JOB_MANAGER_JS0_WAIT_FINISH",        15;
        JobManagerJs1Jobs             = "JOB_MANAGER_JS1_JOBS",               16;
        JobManagerJs1Tasks            = "JOB_MANAGER_JS1_TASKS",              17;
        JobManagerJs1Active           = "JOB_MANAGER_JS1_ACTIVE",             18;
        JobManagerJs1WaitRead         = "JOB_MANAGER_JS1_WAIT_READ",          20;
        JobManagerJs1WaitIssue        = "JOB_MANAGER_JS1_WAIT_ISSUE",         21;
        JobManagerJs1WaitDepend       = "JOB_MANAGER_JS1_WAIT_DEPEND",        22;
        JobManagerJs1WaitFinish       = "JOB_MANAGER_JS1_WAIT_FINISH",        23;
        JobManagerJs2Jobs             = "JOB_MANAGER_JS2_JOBS",               24;
        JobManagerJs2Tasks            = "JOB_MANAGER_JS2_TASKS",              25;
        JobManagerJs2Active           = "JOB_MANAGER_JS2_ACTIVE",             26;
        JobManagerJs2WaitRead         = "JOB_MANAGER_JS2_WAIT_READ",          28;
        JobManagerJs2WaitIssue        = "JOB_MANAGER_JS2_WAIT_ISSUE",         29;
        JobManagerJs2WaitDepend       = "JOB_MANAGER_JS2_WAIT_DEPEND",        30;
        JobManagerJs2WaitFinish       = "JOB_MANAGER_JS2_WAIT_FINISH",        31;

        // Tiler
        TilerTilerActive              = "TILER_TILER_ACTIVE",                 260;
        TilerJobsProcessed            = "TILER_JOBS_PROCESSED",               261;
        TilerTriangles                = "TILER_TRIANGLES",                    262;
        TilerLines                    = "TILER_LINES",                        263;
        TilerPoints                   = "TILER_POINTS",                       264;
        TilerFrontFacing              = "TILER_FRONT_FACING",                 265;
        TilerBackFacing               = "TILER_BACK_FACING",                  266;
        TilerPrimVisible              = "TILER_PRIM_VISIBLE",                 267;
        TilerPrimCulled               = "TILER_PRIM_CULLED",                  268;
        TilerPrimClipped              = "TILER_PRIM_CLIPPED",                 269;
        TilerPrimSatCulled            = "TILER_PRIM_SAT_CULLED",              270;
        TilerBusRead                  = "TILER_BUS_READ",                     273;
        TilerBusWrite                 = "TILER_BUS_WRITE",                    275;
        TilerLoadingDesc              = "TILER_LOADING_DESC",                 276;
        TilerIdvsPosShadReq           = "TILER_IDVS_POS_SHAD_REQ",            277;
        TilerIdvsPosShadWait          = "TILER_IDVS_POS_SHAD_WAIT",           278;
        TilerIdvsPosShadStall         = "TILER_IDVS_POS_SHAD_STALL",          279;
        TilerIdvsPosFifoFull          = "TILER_IDVS_POS_FIFO_FULL",           280;
        TilerPrefetchStall            = "TILER_PREFETCH_STALL",               281;
        TilerVcacheHit                = "TILER_VCACHE_HIT",                   282;
        TilerVcacheMiss               = "TILER_VCACHE_MISS",                  283;
        TilerVcacheLineWait           = "TILER_VCACHE_LINE_WAIT",             284;
        TilerVfetchPosReadWait        = "TILER_VFETCH_POS_READ_WAIT",         285;
        TilerVfetchVertexWait         = "TILER_VFETCH_VERTEX_WAIT",           286;
        TilerVfetchStall              = "TILER_VFETCH_STALL",                 287;
        TilerPrimassyStall            = "TILER_PRIMASSY_STALL",               288;
        TilerBboxGenStall             = "TILER_BBOX_GEN_STALL",               289;
        TilerIdvsVbuHit               = "TILER_IDVS_VBU_HIT",                 290;
        TilerIdvsVbuMiss              = "TILER_IDVS_VBU_MISS",                291;
        TilerIdvsVbuLineDeallocate    = "TILER_IDVS_VBU_LINE_DEALLOCATE",     292;
        TilerIdvsVarShadReq           = "TILER_IDVS_VAR_SHAD_REQ",            293;
        TilerIdvsVarShadStall         = "TILER_IDVS_VAR_SHAD_STALL",          294;
        TilerBinnerStall              = "TILER_BINNER_STALL",                 295;
        TilerIterStall                = "TILER_ITER_STALL",                   296;
        TilerCompressMiss             = "TILER_COMPRESS_MISS",                297;
        TilerCompressStall            = "TILER_COMPRESS_STALL",               298;
        TilerPcacheHit                = "TILER_PCACHE_HIT",                   299;
        TilerPcacheMiss               = "TILER_PCACHE_MISS",                  300;
        TilerPcacheMissStall          = "TILER_PCACHE_MISS_STALL",            301;
        TilerPcacheEvictStall         = "TILER_PCACHE_EVICT_STALL",           302;
        TilerPmgrPtrWrStall           = "TILER_PMGR_PTR_WR_STALL",            303;
        TilerPmgrPtrRdStall           = "TILER_PMGR_PTR_RD_STALL",            304;
        TilerPmgrCmdWrStall           = "TILER_PMGR_CMD_WR_STALL",            305;
        TilerWrbufActive              = "TILER_WRBUF_ACTIVE",                 306;
        TilerWrbufHit                 = "TILER_WRBUF_HIT",                    307;
        TilerWrbufMiss                = "TILER_WRBUF_MISS",                   308;
        TilerWrbufNoFreeLineStall     = "TILER_WRBUF_NO_FREE_LINE_STALL",     309;
        TilerWrbufNoAxiIdStall        = "TILER_WRBUF_NO_AXI_ID_STALL",        310;
        TilerWrbufAxiStall            = "TILER_WRBUF_AXI_STALL",              311;
        TilerUtlbTrans                = "TILER_UTLB_TRANS",                   315;
        TilerUtlbTransHit             = "TILER_UTLB_TRANS_HIT",               316;
        TilerUtlbTransStall           = "TILER_UTLB_TRANS_STALL",             317;
        TilerUtlbTransMissDelay       = "TILER_UTLB_TRANS_MISS_DELAY",        318;
        TilerUtlbMmuReq               = "TILER_UTLB_MMU_REQ",                 319;

        // Shader core
        ShaderCoreFragActive          = "SHADER_CORE_FRAG_ACTIVE",            516;
        ShaderCoreFragPrimitives      = "SHADER_CORE_FRAG_PRIMITIVES",        517;
        ShaderCoreFragPrimRast        = "SHADER_CORE_FRAG_PRIM_RAST",         518;
        ShaderCoreFragFpkActive       = "SHADER_CORE_FRAG_FPK_ACTIVE",        519;
        ShaderCoreFragStarving        = "SHADER_CORE_FRAG_STARVING",          520;
        ShaderCoreFragWarps           = "SHADER_CORE_FRAG_WARPS",             521;
        ShaderCoreFragPartialWarps    = "SHADER_CORE_FRAG_PARTIAL_WARPS",     522;
        ShaderCoreFragQuadsRast       = "SHADER_CORE_FRAG_QUADS_RAST",        523;
        ShaderCoreFragQuadsEzsTest    = "SHADER_CORE_FRAG_QUADS_EZS_TEST",    524;
        ShaderCoreFragQuadsEzsUpdate  = "SHADER_CORE_FRAG_QUADS_EZS_UPDATE",  525;
        ShaderCoreFragQuadsEzsKill    = "SHADER_CORE_FRAG_QUADS_EZS_KILL",    526;
        ShaderCoreFragLzsTest         = "SHADER_CORE_FRAG_LZS_TEST",          527;
        ShaderCoreFragLzsKill         = "SHADER_CORE_FRAG_LZS_KILL",          528;
        ShaderCoreFragPtiles          = "SHADER_CORE_FRAG_PTILES",            530;
        ShaderCoreFragTransElim       = "SHADER_CORE_FRAG_TRANS_ELIM",        531;
        ShaderCoreQuadFpkKiller       = "SHADER_CORE_QUAD_FPK_KILLER",        532;
        ShaderCoreComputeActive       = "SHADER_CORE_COMPUTE_ACTIVE",         534;
        ShaderCoreComputeTasks        = "SHADER_CORE_COMPUTE_TASKS",          535;
        ShaderCoreComputeWarps        = "SHADER_CORE_COMPUTE_WARPS",          536;
        ShaderCoreComputeStarving     = "SHADER_CORE_COMPUTE_STARVING",       537;
        ShaderCoreExecCoreActive      = "SHADER_CORE_EXEC_CORE_ACTIVE",       538;
        ShaderCoreExecActive          = "SHADER_CORE_EXEC_ACTIVE",            539;
        ShaderCoreExecInstrCount      = "SHADER_CORE_EXEC_INSTR_COUNT",       540;
        ShaderCoreExecInstrDiverged   = "SHADER_CORE_EXEC_INSTR_DIVERGED",    541;
        ShaderCoreExecInstrStarving   = "SHADER_CORE_EXEC_INSTR_STARVING",    542;
        ShaderCoreArithInstrSingleFma = "SHADER_CORE_ARITH_INSTR_SINGLE_FMA", 543;
        ShaderCoreArithInstrDouble    = "SHADER_CORE_ARITH_INSTR_DOUBLE",     544;
        ShaderCoreArithInstrMsg       = "SHADER_CORE_ARITH_INSTR_MSG",        545;
        ShaderCoreArithInstrMsgOnly   = "SHADER_CORE_ARITH_INSTR_MSG_ONLY",   546;
        ShaderCoreLsMemReadFull       = "SHADER_CORE_LS_MEM_READ_FULL",       556;
        ShaderCoreLsMemReadShort      = "SHADER_CORE_LS_MEM_READ_SHORT",      557;
        ShaderCoreLsMemWriteFull      = "SHADER_CORE_LS_MEM_WRITE_FULL",      558;
        ShaderCoreLsMemWriteShort     = "SHADER_CORE_LS_MEM_WRITE_SHORT",     559;
        ShaderCoreLsMemAtomic         = "SHADER_CORE_LS_MEM_ATOMIC",          560;
        ShaderCoreVaryInstr           = "SHADER_CORE_VARY_INSTR",             561;
        ShaderCoreVarySlot32          = "SHADER_CORE_VARY_SLOT_32",           562;
        ShaderCoreVarySlot16          = "SHADER_CORE_VARY_SLOT_16",           563;
        ShaderCoreAttrInstr           = "SHADER_CORE_ATTR_INSTR",             564;
        ShaderCoreArithInstrFpMul     = "SHADER_CORE_ARITH_INSTR_FP_MUL",     565;
        ShaderCoreBeatsRdFtc          = "SHADER_CORE_BEATS_RD_FTC",           566;
        ShaderCoreBeatsRdFtcExt       = "SHADER_CORE_BEATS_RD_FTC_EXT",       567;
        ShaderCoreBeatsRdLsc          = "SHADER_CORE_BEATS_RD_LSC",           568;
        ShaderCoreBeatsRdLscExt       = "SHADER_CORE_BEATS_RD_LSC_EXT",       569;
        ShaderCoreBeatsRdTex          = "SHADER_CORE_BEATS_RD_TEX",           570;
        ShaderCoreBeatsRdTexExt       = "SHADER_CORE_BEATS_RD_TEX_EXT",       571;
        ShaderCoreBeatsRdOther        = "SHADER_CORE_BEATS_RD_OTHER",         572;
        ShaderCoreBeatsWrTib          = "SHADER_CORE_BEATS_WR_TIB",           574;

        // Memory system
        MemoryMmuRequests             = "MEMORY_MMU_REQUESTS",                772;
        MemoryL2RdMsgIn               = "MEMORY_L2_RD_MSG_IN",                784;
        MemoryL2RdMsgInStall          = "MEMORY_L2_RD_MSG_IN_STALL",          785;
        MemoryL2WrMsgIn               = "MEMORY_L2_WR_MSG_IN",                786;
        MemoryL2WrMsgInStall          = "MEMORY_L2_WR_MSG_IN_STALL",          787;
        MemoryL2SnpMsgIn              = "MEMORY_L2_SNP_MSG_IN",               788;
        MemoryL2SnpMsgInStall         = "MEMORY_L2_SNP_MSG_IN_STALL",         789;
        MemoryL2RdMsgOut              = "MEMORY_L2_RD_MSG_OUT",               790;
        MemoryL2RdMsgOutStall         = "MEMORY_L2_RD_MSG_OUT_STALL",         791;
        MemoryL2WrMsgOut              = "MEMORY_L2_WR_MSG_OUT",               792;
        MemoryL2AnyLookup             = "MEMORY_L2_ANY_LOOKUP",               793;
        MemoryL2ReadLookup            = "MEMORY_L2_READ_LOOKUP",              794;
        MemoryL2WriteLookup           = "MEMORY_L2_WRITE_LOOKUP",             795;
        MemoryL2ExtSnoopLookup        = "MEMORY_L2_EXT_SNOOP_LOOKUP",         796;
        MemoryL2ExtRead               = "MEMORY_L2_EXT_READ",                 797;
        MemoryL2ExtReadNosnp          = "MEMORY_L2_EXT_READ_NOSNP",           798;
        MemoryL2ExtReadUnique         = "MEMORY_L2_EXT_READ_UNIQUE",          799;
        MemoryL2ExtReadBeats          = "MEMORY_L2_EXT_READ_BEATS",           800;
        MemoryL2ExtArStall            = "MEMORY_L2_EXT_AR_STALL",             801;
        MemoryL2ExtArCntQ1            = "MEMORY_L2_EXT_AR_CNT_Q1",            802;
        MemoryL2ExtArCntQ2            = "MEMORY_L2_EXT_AR_CNT_Q2",            803;
        MemoryL2ExtArCntQ3            = "MEMORY_L2_EXT_AR_CNT_Q3",            804;
        MemoryL2ExtRresp0127          = "MEMORY_L2_EXT_RRESP_0_127",          805;
        MemoryL2ExtRresp128191        = "MEMORY_L2_EXT_RRESP_128_191",        806;
        MemoryL2ExtRresp192255        = "MEMORY_L2_EXT_RRESP_192_255",        807;
        MemoryL2ExtRresp256319        = "MEMORY_L2_EXT_RRESP_256_319",        808;
        MemoryL2ExtRresp320383        = "MEMORY_L2_EXT_RRESP_320_383",        809;
        MemoryL2ExtWrite              = "MEMORY_L2_EXT_WRITE",                810;
        MemoryL2ExtWriteNosnpFull     = "MEMORY_L2_EXT_WRITE_NOSNP_FULL",     811;
        MemoryL2ExtWriteNosnpPtl      = "MEMORY_L2_EXT_WRITE_NOSNP_PTL",      812;
        MemoryL2ExtWriteSnpFull       = "MEMORY_L2_EXT_WRITE_SNP_FULL",       813;
        MemoryL2ExtWriteSnpPtl        = "MEMORY_L2_EXT_WRITE_SNP_PTL",        814;
        MemoryL2ExtWriteBeats         = "MEMORY_L2_EXT_WRITE_BEATS",          815;
        MemoryL2ExtWStall             = "MEMORY_L2_EXT_W_STALL",              816;
        MemoryL2ExtAwCntQ1            = "MEMORY_L2_EXT_AW_CNT_Q1",            817;
        MemoryL2ExtAwCntQ2            = "MEMORY_L2_EXT_AW_CNT_Q2",            818;
        MemoryL2ExtAwCntQ3            = "MEMORY_L2_EXT_AW_CNT_Q3",            819;
        MemoryL2ExtSnoop              = "MEMORY_L2_EXT_SNOOP",                820;
        MemoryL2ExtSnoopStall         = "MEMORY_L2_EXT_SNOOP_STALL",          821;
        MemoryL2ExtSnoopRespClean     = "MEMORY_L2_EXT_SNOOP_RESP_CLEAN",     822;
        MemoryL2ExtSnoopRespData      = "MEMORY_L2_EXT_SNOOP_RESP_DATA",      823;
        MemoryL2ExtSnoopInternal      = "MEMORY_L2_EXT_SNOOP_INTERNAL",       824;
    }
}

counter_table! {
    /// Counters of the Valhall layouts (Mali-G57 and later)
    pub enum MaliValhallCounter {
        // Job manager
        JobManagerMessagesSent                   = "JOB_MANAGER_MESSAGES_SENT",                       4;
        JobManagerMessagesReceived               = "JOB_MANAGER_MESSAGES_RECEIVED",                   5;
        JobManagerGpuActive                      = "JOB_MANAGER_GPU_ACTIVE",                          6;
        JobManagerIrqActive                      = "JOB_MANAGER_IRQ_ACTIVE",                          7;
        JobManagerJs0Jobs                        = "JOB_MANAGER_JS0_JOBS",                            8;
        JobManagerJs0Tasks                       = "JOB_MANAGER_JS0_TASKS",                           9;
        JobManagerJs0Active                      = "JOB_MANAGER_JS0_ACTIVE",                          10;
        JobManagerJs0WaitFlush                   = "JOB_MANAGER_JS0_WAIT_FLUSH",                      11;
        JobManagerJs0WaitRead                    = "JOB_MANAGER_JS0_WAIT_READ",                       12;
        JobManagerJs0WaitIssue                   = "JOB_MANAGER_JS0_WAIT_ISSUE",                      13;
        JobManagerJs0WaitDepend                  = "JOB_MANAGER_JS0_WAIT_DEPEND",                     14;
        JobManagerJs0WaitFinish                  = "JOB_MANAGER_JS0_WAIT_FINISH",                     15;
        JobManagerJs1Jobs                        = "JOB_MANAGER_JS1_JOBS",                            16;
        JobManagerJs1Tasks                       = "JOB_MANAGER_JS1_TASKS",                           17;
        JobManagerJs1Active                      = "JOB_MANAGER_JS1_ACTIVE",                          18;
        JobManagerJs1WaitFlush                   = "JOB_MANAGER_JS1_WAIT_FLUSH",                      19;
        JobManagerJs1WaitRead                    = "JOB_MANAGER_JS1_WAIT_READ",                       20;
        JobManagerJs1WaitIssue                   = "JOB_MANAGER_JS1_WAIT_ISSUE",                      21;
        JobManagerJs1WaitDepend                  = "JOB_MANAGER_JS1_WAIT_DEPEND",                     22;
        JobManagerJs1WaitFinish                  = "JOB_MANAGER_JS1_WAIT_FINISH",                     23;
        JobManagerJs2Jobs                        = "JOB_MANAGER_JS2_JOBS",                            24;
        JobManagerJs2Tasks                       = "JOB_MANAGER_JS2_TASKS",                           25;
        JobManagerJs2Active                      = "JOB_MANAGER_JS2_ACTIVE",                          26;
        JobManagerJs2WaitFlush                   = "JOB_MANAGER_JS2_WAIT_FLUSH",                      27;
        JobManagerJs2WaitRead                    = "JOB_MANAGER_JS2_WAIT_READ",                       28;
        JobManagerJs2WaitIssue                   = "JOB_MANAGER_JS2_WAIT_ISSUE",                      29;
        JobManagerJs2WaitDepend                  = "JOB_MANAGER_JS2_WAIT_DEPEND",                     30;
        JobManagerJs2WaitFinish                  = "JOB_MANAGER_JS2_WAIT_FINISH",                     31;
        JobManagerCacheFlush                     = "JOB_MANAGER_CACHE_FLUSH",                         63;

        // Tiler
        TilerTilerActive                         = "TILER_TILER_ACTIVE",                              260;
        TilerJobsProcessed                       = "TILER_JOBS_PROCESSED",                            261;
        TilerTriangles                           = "TILER_TRIANGLES",                                 262;
        TilerLines                               = "TILER_LINES",                                     263;
        TilerPoints                              = "TILER_POINTS",                                    264;
        TilerFrontFacing                         = "TILER_FRONT_FACING",                              265;
        TilerBackFacing                          = "TILER_BACK_FACING",                               266;
        TilerPrimVisible                         = "TILER_PRIM_VISIBLE",                              267;
        TilerPrimCulled                          = "TILER_PRIM_CULLED",                               268;
        TilerPrimClipped                         = "TILER_PRIM_CLIPPED",                              269;
        TilerPrimSatCulled                       = "TILER_PRIM_SAT_CULLED",                           270;
        TilerBinAllocInit                        = "TILER_BIN_ALLOC_INIT",                            271;
        TilerBinAllocOverflow                    = "TILER_BIN_ALLOC_OVERFLOW",                        272;
        TilerBusRead                             = "TILER_BUS_READ",                                  273;
        TilerBusWriteUtlb0                       = "TILER_BUS_WRITE_UTLB0",                           274;
        TilerBusWriteUtlb1                       = "TILER_BUS_WRITE_UTLB1",                           275;
        TilerLoadingDesc                         = "TILER_LOADING_DESC",                              276;
        TilerIdvsPosShadReq                      = "TILER_IDVS_POS_SHAD_REQ",                         277;
        TilerIdvsPosShadWait                     = "TILER_IDVS_POS_SHAD_WAIT",                        278;
        TilerIdvsPosShadStall                    = "TILER_IDVS_POS_SHAD_STALL",                       279;
        TilerIdvsPosFifoFull                     = "TILER_IDVS_POS_FIFO_FULL",                        280;
        TilerPrefetchStall                       = "TILER_PREFETCH_STALL",                            281;
        TilerVcacheHit                           = "TILER_VCACHE_HIT",                                282;
        TilerVcacheMiss                          = "TILER_VCACHE_MISS",                               283;
        TilerVcacheLineWait                      = "TILER_VCACHE_LINE_WAIT",                          284;
        TilerVfetchPosReadWait                   = "TILER_VFETCH_POS_READ_WAIT",                      285;
        TilerVfetchVertexWait                    = "TILER_VFETCH_VERTEX_WAIT",                        286;
        TilerVfetchStall                         = "TILER_VFETCH_STALL",                              287;
        TilerPrimassyStall                       = "TILER_PRIMASSY_STALL",                            288;
        TilerBboxGenStall                        = "TILER_BBOX_GEN_STALL",                            289;
        TilerIdvsVbuHit                          = "TILER_IDVS_VBU_HIT",                              290;
        TilerIdvsVbuMiss                         = "TILER_IDVS_VBU_MISS",                             291;
        TilerIdvsVbuLineDeallocate               = "TILER_IDVS_VBU_LINE_DEALLOCATE",                  292;
        TilerIdvsVarShadReq                      = "TILER_IDVS_VAR_SHAD_REQ",                         293;
        TilerIdvsVarShadStall                    = "TILER_IDVS_VAR_SHAD_STALL",                       294;
        TilerBinnerStall                         = "TILER_BINNER_STALL",                              295;
        TilerIterStall                           = "TILER_ITER_STALL",                                296;
        TilerCompressMiss                        = "TILER_COMPRESS_MISS",                             297;
        TilerCompressStall                       = "TILER_COMPRESS_STALL",                            298;
        TilerPcacheHit                           = "TILER_PCACHE_HIT",                                299;
        TilerPcacheMiss                          = "TILER_PCACHE_MISS",                               300;
        TilerPcacheMissStall                     = "TILER_PCACHE_MISS_STALL",                         301;
        TilerPcacheEvictStall                    = "TILER_PCACHE_EVICT_STALL",                        302;
        TilerPmgrPtrWrStall                      = "TILER_PMGR_PTR_WR_STALL",                         303;
        TilerPmgrPtrRdStall                      = "TILER_PMGR_PTR_RD_STALL",                         304;
        TilerPmgrCmdWrStall                      = "TILER_PMGR_CMD_WR_STALL",                         305;
        TilerWrbufActive                         = "TILER_WRBUF_ACTIVE",                              306;
        TilerWrbufHit                            = "TILER_WRBUF_HIT",                                 307;
        TilerWrbufMiss                           = "TILER_WRBUF_MISS",                                308;
        TilerWrbufNoFreeLineStall                = "TILER_WRBUF_NO_FREE_LINE_STALL",                  309;
        TilerWrbufNoAxiIdStall                   = "TILER_WRBUF_NO_AXI_ID_STALL",                     310;
        TilerWrbufAxiStall                       = "TILER_WRBUF_AXI_STALL",                           311;

        // Shader core
        ShaderCoreFragActive                     = "SHADER_CORE_FRAG_ACTIVE",                         516;
        ShaderCoreFragPrimitivesOut              = "SHADER_CORE_FRAG_PRIMITIVES_OUT",                 517;
        ShaderCoreFragPrimRast                   = "SHADER_CORE_FRAG_PRIM_RAST",                      518;
        ShaderCoreFragFpkActive                  = "SHADER_CORE_FRAG_FPK_ACTIVE",                     519;
        ShaderCoreFragStarving                   = "SHADER_CORE_FRAG_STARVING",                       520;
        ShaderCoreFragWarps                      = "SHADER_CORE_FRAG_WARPS",                          521;
        ShaderCoreFragPartialQuadsRast           = "SHADER_CORE_FRAG_PARTIAL_QUADS_RAST",             522;
        ShaderCoreFragQuadsRast                  = "SHADER_CORE_FRAG_QUADS_RAST",                     523;
        ShaderCoreFragQuadsEzsTest               = "SHADER_CORE_FRAG_QUADS_EZS_TEST",                 524;
        ShaderCoreFragQuadsEzsUpdate             = "SHADER_CORE_FRAG_QUADS_EZS_UPDATE",               525;
        ShaderCoreFragQuadsEzsKill               = "SHADER_CORE_FRAG_QUADS_EZS_KILL",                 526;
        ShaderCoreFragLzsTest                    = "SHADER_CORE_FRAG_LZS_TEST",                       527;
        ShaderCoreFragLzsKill                    = "SHADER_CORE_FRAG_LZS_KILL",                       528;
        ShaderCoreWarpRegSize64                  = "SHADER_CORE_WARP_REG_SIZE_64",                    529;
        ShaderCoreFragPtiles                     = "SHADER_CORE_FRAG_PTILES",                         530;
        ShaderCoreFragTransElim                  = "SHADER_CORE_FRAG_TRANS_ELIM",                     531;
        ShaderCoreQuadFpkKiller                  = "SHADER_CORE_QUAD_FPK_KILLER",                     532;
        ShaderCoreFullQuadWarps                  = "SHADER_CORE_FULL_QUAD_WARPS",                     533;
        ShaderCoreComputeActive                  = "SHADER_CORE_COMPUTE_ACTIVE",                      534;
        ShaderCoreComputeTasks                   = "SHADER_CORE_COMPUTE_TASKS",                       535;
        ShaderCoreComputeWarps                   = "SHADER_CORE_COMPUTE_WARPS",                       536;
        ShaderCoreComputeStarving                = "SHADER_CORE_COMPUTE_STARVING",                    537;
        ShaderCoreExecCoreActive                 = "SHADER_CORE_EXEC_CORE_ACTIVE",                    538;
        ShaderCoreExecInstrFma                   = "SHADER_CORE_EXEC_INSTR_FMA",                      539;
        ShaderCoreExecInstrCvt                   = "SHADER_CORE_EXEC_INSTR_CVT",                      540;
        ShaderCoreExecInstrSfu                   = "SHADER_CORE_EXEC_INSTR_SFU",                      541;
        ShaderCoreExecInstrMsg                   = "SHADER_CORE_EXEC_INSTR_MSG",                      542;
        ShaderCoreExecInstrDiverged              = "SHADER_CORE_EXEC_INSTR_DIVERGED",                 543;
        ShaderCoreExecIcacheMiss                 = "SHADER_CORE_EXEC_ICACHE_MISS",                    544;
        ShaderCoreExecStarveArith                = "SHADER_CORE_EXEC_STARVE_ARITH",                   545;
        ShaderCoreCallBlendShader                = "SHADER_CORE_CALL_BLEND_SHADER",                   546;
        ShaderCoreTexMsgiNumFlits                = "SHADER_CORE_TEX_MSGI_NUM_FLITS",                  547;
        ShaderCoreTexDfchClkStalled              = "SHADER_CORE_TEX_DFCH_CLK_STALLED",                548;
        ShaderCoreTexTfchClkStalled              = "SHADER_CORE_TEX_TFCH_CLK_STALLED",                549;
        ShaderCoreTexTfchStarvedPendingDataFetch = "SHADER_CORE_TEX_TFCH_STARVED_PENDING_DATA_FETCH", 550;
        ShaderCoreTexFiltNumOperations           = "SHADER_CORE_TEX_FILT_NUM_OPERATIONS",             551;
        ShaderCoreTexFiltNumFxrOperations        = "SHADER_CORE_TEX_FILT_NUM_FXR_OPERATIONS",         552;
        ShaderCoreTexFiltNumFstOperations        = "SHADER_CORE_TEX_FILT_NUM_FST_OPERATIONS",         553;
        ShaderCoreTexMsgoNumMsg                  = "SHADER_CORE_TEX_MSGO_NUM_MSG",                    554;
        ShaderCoreTexMsgoNumFlits                = "SHADER_CORE_TEX_MSGO_NUM_FLITS",                  555;
        ShaderCoreLsMemReadFull                  = "SHADER_CORE_LS_MEM_READ_FULL",                    556;
        ShaderCoreLsMemReadShort                 = "SHADER_CORE_LS_MEM_READ_SHORT",                   557;
        ShaderCoreLsMemWriteFull                 = "SHADER_CORE_LS_MEM_WRITE_FULL",                   558;
        ShaderCoreLsMemWriteShort                = "SHADER_CORE_LS_MEM_WRITE_SHORT",                  559;
        ShaderCoreLsMemAtomic                    = "SHADER_CORE_LS_MEM_ATOMIC",                       560;
        ShaderCoreVaryInstr                      = "SHADER_CORE_VARY_INSTR",                          561;
        ShaderCoreVarySlot32                     = "SHADER_CORE_VARY_SLOT_32",                        562;
        ShaderCoreVarySlot16                     = "SHADER_CORE_VARY_SLOT_16",                        563;
        ShaderCoreAttrInstr                      = "SHADER_CORE_ATTR_INSTR",                          564;
        ShaderCoreBeatsRdFtc                     = "SHADER_CORE_BEATS_RD_FTC",                        566;
        ShaderCoreBeatsRdFtcExt                  = "SHADER_CORE_BEATS_RD_FTC_EXT",                    567;
        ShaderCoreBeatsRdLsc                     = "SHADER_CORE_BEATS_RD_LSC",                        568;
        ShaderCoreBeatsRdLscExt                  = "SHADER_CORE_BEATS_RD_LSC_EXT",                    569;
        ShaderCoreBeatsRdTex                     = "SHADER_CORE_BEATS_RD_TEX",                        570;
        ShaderCoreBeatsRdTexExt                  = "SHADER_CORE_BEATS_RD_TEX_EXT",                    571;
        ShaderCoreBeatsRdOther                   = "SHADER_CORE_BEATS_RD_OTHER",                      572;
        ShaderCoreBeatsWrLscOther                = "SHADER_CORE_BEATS_WR_LSC_OTHER",                  573;
        ShaderCoreBeatsWrTib                     = "SHADER_CORE_BEATS_WR_TIB",                        574;
        ShaderCoreBeatsWrLscWb                   = "SHADER_CORE_BEATS_WR_LSC_WB",                     575;

        // Memory system
        MemoryMmuRequests                        = "MEMORY_MMU_REQUESTS",                             772;
        MemoryMmuTableReadsL3                    = "MEMORY_MMU_TABLE_READS_L3",                       773;
        MemoryMmuTableReadsL2                    = "MEMORY_MMU_TABLE_READS_L2",                       774;
        MemoryMmuHitL3                           = "MEMORY_MMU_HIT_L3",                               775;
        MemoryMmuHitL2                           = "MEMORY_MMU_HIT_L2",                               776;
        MemoryMmuS2Requests                      = "MEMORY_MMU_S2_REQUESTS",                          777;
        MemoryMmuS2TableReadsL3                  = "MEMORY_MMU_S2_TABLE_READS_L3",                    778;
        MemoryMmuS2TableReadsL2                  = "MEMORY_MMU_S2_TABLE_READS_L2",                    779;
        MemoryMmuS2HitL3                         = "MEMORY_MMU_S2_HIT_L3",                            780;
        MemoryMmuS2HitL2                         = "MEMORY_MMU_S2_HIT_L2",                            781;
        MemoryL2RdMsgIn                          = "MEMORY_L2_RD_MSG_IN",                             784;
        MemoryL2RdMsgInStall                     = "MEMORY_L2_RD_MSG_IN_STALL",                       785;
        MemoryL2WrMsgIn                          = "MEMORY_L2_WR_MSG_IN",                             786;
        MemoryL2WrMsgInStall                     = "MEMORY_L2_WR_MSG_IN_STALL",                       787;
        MemoryL2SnpMsgIn                         = "MEMORY_L2_SNP_MSG_IN",                            788;
        MemoryL2SnpMsgInStall                    = "MEMORY_L2_SNP_MSG_IN_STALL",                      789;
        MemoryL2RdMsgOut                         = "MEMORY_L2_RD_MSG_OUT",                            790;
        MemoryL2RdMsgOutStall                    = "MEMORY_L2_RD_MSG_OUT_STALL",                      791;
        MemoryL2WrMsgOut                         = "MEMORY_L2_WR_MSG_OUT",                            792;
        MemoryL2AnyLookup                        = "MEMORY_L2_ANY_LOOKUP",                            793;
        MemoryL2ReadLookup                       = "MEMORY_L2_READ_LOOKUP",                           794;
        MemoryL2WriteLookup                      = "MEMORY_L2_WRITE_LOOKUP",                          795;
        MemoryL2ExtSnoopLookup                   = "MEMORY_L2_EXT_SNOOP_LOOKUP",                      796;
        MemoryL2ExtRead                          = "MEMORY_L2_EXT_READ",                              797;
        MemoryL2ExtReadNosnp                     = "MEMORY_L2_EXT_READ_NOSNP",                        798;
        MemoryL2ExtReadUnique                    = "MEMORY_L2_EXT_READ_UNIQUE",                       799;
        MemoryL2ExtReadBeats                     = "MEMORY_L2_EXT_READ_BEATS",                        800;
        MemoryL2ExtArStall                       = "MEMORY_L2_EXT_AR_STALL",                          801;
        MemoryL2ExtArCntQ1                       = "MEMORY_L2_EXT_AR_CNT_Q1",                         802;
        MemoryL2ExtArCntQ2                       = "MEMORY_L2_EXT_AR_CNT_Q2",                         803;
        MemoryL2ExtArCntQ3                       = "MEMORY_L2_EXT_AR_CNT_Q3",                         804;
        MemoryL2ExtRresp0127                     = "MEMORY_L2_EXT_RRESP_0_127",                       805;
        MemoryL2ExtRresp128191                   = "MEMORY_L2_EXT_RRESP_128_191",                     806;
        MemoryL2ExtRresp192255                   = "MEMORY_L2_EXT_RRESP_192_255",                     807;
        MemoryL2ExtRresp256319                   = "MEMORY_L2_EXT_RRESP_256_319",                     808;
        MemoryL2ExtRresp320383                   = "MEMORY_L2_EXT_RRESP_320_383",                     809;
        MemoryL2ExtWrite                         = "MEMORY_L2_EXT_WRITE",                             810;
        MemoryL2ExtWriteNosnpFull                = "MEMORY_L2_EXT_WRITE_NOSNP_FULL",                  811;
        MemoryL2ExtWriteNosnpPtl                 = "MEMORY_L2_EXT_WRITE_NOSNP_PTL",                   812;
        MemoryL2ExtWriteSnpFull                  = "MEMORY_L2_EXT_WRITE_SNP_FULL",                    813;
        MemoryL2ExtWriteSnpPtl                   = "MEMORY_L2_EXT_WRITE_SNP_PTL",                     814;
        MemoryL2ExtWriteBeats                    = "MEMORY_L2_EXT_WRITE_BEATS",                       815;
        MemoryL2ExtWStall                        = "MEMORY_L2_EXT_W_STALL",                           816;
        MemoryL2ExtAwCntQ1                       = "MEMORY_L2_EXT_AW_CNT_Q1",                         817;
        MemoryL2ExtAwCntQ2                       = "MEMORY_L2_EXT_AW_CNT_Q2",                         818;
        MemoryL2ExtAwCntQ3                       = "MEMORY_L2_EXT_AW_CNT_Q3",                         819;
        MemoryL2ExtSnoop                         = "MEMORY_L2_EXT_SNOOP",                             820;
        MemoryL2ExtSnoopStall                    = "MEMORY_L2_EXT_SNOOP_STALL",                       821;
        MemoryL2ExtSnoopRespClean                = "MEMORY_L2_EXT_SNOOP_RESP_CLEAN",                  822;
        MemoryL2ExtSnoopRespData                 = "MEMORY_L2_EXT_SNOOP_RESP_DATA",                   823;
        MemoryL2ExtSnoopInternal                 = "MEMORY_L2_EXT_SNOOP_INTERNAL",                    824;
    }
}

impl Counter for MaliCounter {
    type Generation = MaliLayout;

    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.hardware_name())
    }

    fn encode(self, layout: MaliLayout) -> HpcResult<CounterSlot> {
        let family = layout.family().ok_or_else(|| unsupported(&self, layout))?;
        Ok(CounterSlot::from_packed(self.packed_for(family)))
    }
}

impl Counter for MaliBifrostCounter {
    type Generation = MaliLayout;

    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.hardware_name())
    }

    fn encode(self, layout: MaliLayout) -> HpcResult<CounterSlot> {
        match layout.family() {
            Some(MaliFamily::Bifrost) => Ok(CounterSlot::from_packed(self.raw())),
            _ => Err(unsupported(&self, layout)),
        }
    }
}

impl Counter for MaliValhallCounter {
    type Generation = MaliLayout;

    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.hardware_name())
    }

    fn encode(self, layout: MaliLayout) -> HpcResult<CounterSlot> {
        match layout.family() {
            Some(MaliFamily::Valhall) => Ok(CounterSlot::from_packed(self.raw())),
            _ => Err(unsupported(&self, layout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HpcError;

    #[test]
    fn test_table_sizes() {
        assert_eq!(MaliCounter::ALL.len(), 50);
        assert_eq!(MaliBifrostCounter::ALL.len(), 168);
        assert_eq!(MaliValhallCounter::ALL.len(), 191);
    }

    #[test]
    fn test_common_counter_per_family() {
        let counter = MaliCounter::TilerTriangles;
        assert_eq!(counter.encode(MaliLayout::T88x).unwrap(), CounterSlot::new(block::TILER, 4));
        assert_eq!(counter.encode(MaliLayout::Tmix).unwrap(), CounterSlot::new(block::TILER, 6));
        assert_eq!(counter.encode(MaliLayout::Tbox).unwrap(), CounterSlot::new(block::TILER, 6));

        let l2 = MaliCounter::MemoryL2ExtWriteBeats;
        assert_eq!(l2.encode(MaliLayout::T86x).unwrap(), CounterSlot::new(block::MEMORY, 30));
        assert_eq!(l2.encode(MaliLayout::Ttrx).unwrap(), CounterSlot::new(block::MEMORY, 47));
    }

    #[test]
    fn test_common_counters_match_family_tables_by_name() {
        for counter in MaliCounter::ALL {
            let bifrost: MaliBifrostCounter = counter.hardware_name().parse().unwrap();
            let valhall: MaliValhallCounter = counter.hardware_name().parse().unwrap();
            assert_eq!(counter.packed_for(MaliFamily::Bifrost), bifrost.raw());
            assert_eq!(counter.packed_for(MaliFamily::Valhall), valhall.raw());
        }
    }

    #[test]
    fn test_family_specific_counters_reject_other_families() {
        let bifrost = MaliBifrostCounter::ShaderCoreExecInstrCount;
        assert!(bifrost.encode(MaliLayout::Tgox).is_ok());
        assert!(matches!(
            bifrost.encode(MaliLayout::Tbox),
            Err(HpcError::UnsupportedCounter { .. })
        ));

        let valhall = MaliValhallCounter::ShaderCoreExecInstrFma;
        assert_eq!(
            valhall.encode(MaliLayout::Tnax).unwrap(),
            CounterSlot::new(block::SHADER_CORE, 27)
        );
        assert!(valhall.encode(MaliLayout::T88x).is_err());
    }

    #[test]
    fn test_unknown_layout_rejects_everything() {
        for counter in MaliCounter::ALL {
            assert!(counter.encode(MaliLayout::Unknown).is_err());
        }
    }

    #[test]
    fn test_selectors_fit_in_a_block() {
        for counter in MaliValhallCounter::ALL {
            let slot = counter.encode(MaliLayout::Tbox).unwrap();
            assert!(slot.group_id <= block::MEMORY);
            assert!(slot.selector < 64);
        }
    }
}
