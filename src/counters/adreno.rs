//! Qualcomm Adreno counters
//!
//! Selector tables for the A6xx and A5xx series are generated from the
//! vendor register databases; do not edit the table by hand.

use std::borrow::Cow;

use super::{counter_table, unsupported, Counter, CounterSlot, GROUP_SHIFT};
use crate::error::HpcResult;
use crate::mappings::AdrenoSeries;

/// KGSL perfcounter group ids
pub mod kgsl_group {
    #![allow(missing_docs)]
    pub const CP: u32 = 0x0;
    pub const RBBM: u32 = 0x1;
    pub const PC: u32 = 0x2;
    pub const VFD: u32 = 0x3;
    pub const HLSQ: u32 = 0x4;
    pub const VPC: u32 = 0x5;
    pub const TSE: u32 = 0x6;
    pub const RAS: u32 = 0x7;
    pub const UCHE: u32 = 0x8;
    pub const TP: u32 = 0x9;
    pub const SP: u32 = 0xA;
    pub const RB: u32 = 0xB;
    pub const VSC: u32 = 0x17;
    pub const CCU: u32 = 0x18;
    pub const LRZ: u32 = 0x19;
    pub const CMP: u32 = 0x1A;
}

macro_rules! adreno_table {
    ( $( $variant:ident = $hw_name:literal, $group:ident [$index:literal] => $a6xx:literal, $a5xx:literal; )* ) => {
        counter_table! {
            /// Counters available on every supported Adreno series
            ///
            /// The logical id is `(kgsl_group << 8) | index_in_group`.
            pub enum AdrenoCounter {
                $( $variant = $hw_name, (kgsl_group::$group << GROUP_SHIFT) | $index; )*
            }
        }

        impl AdrenoCounter {
            /// Countable selector of this counter on `series`
            pub fn selector(self, series: AdrenoSeries) -> Option<u32> {
                match series {
                    AdrenoSeries::A6xx => match self {
                        $( AdrenoCounter::$variant => Some($a6xx), )*
                    },
                    AdrenoSeries::A5xx => match self {
                        $( AdrenoCounter::$variant => Some($a5xx), )*
                    },
                    AdrenoSeries::Unknown => None,
                }
            }
        }
    };
}

adreno_table! {
    // CP
    CpAlwaysCount                      = "CP_ALWAYS_COUNT",                          CP[0] => 0, 0;
    CpBusyGfxCoreIdle                  = "CP_BUSY_GFX_CORE_IDLE",                    CP[1] => 1, 1;
    CpBusyCycles                       = "CP_BUSY_CYCLES",                           CP[2] => 2, 2;
    CpNumPreemptions                   = "CP_NUM_PREEMPTIONS",                       CP[3] => 3, 20;
    CpPreemptionReactionDelay          = "CP_PREEMPTION_REACTION_DELAY",             CP[4] => 4, 21;
    CpPreemptionSwitchOutTime          = "CP_PREEMPTION_SWITCH_OUT_TIME",            CP[5] => 5, 22;
    CpPreemptionSwitchInTime           = "CP_PREEMPTION_SWITCH_IN_TIME",             CP[6] => 6, 23;
    CpDeadDrawsInBinRender             = "CP_DEAD_DRAWS_IN_BIN_RENDER",              CP[7] => 7, 24;
    CpPredicatedDrawsKilled            = "CP_PREDICATED_DRAWS_KILLED",               CP[8] => 8, 25;
    CpModeSwitch                       = "CP_MODE_SWITCH",                           CP[9] => 9, 26;
    CpZpassDone                        = "CP_ZPASS_DONE",                            CP[10] => 10, 27;
    CpContextDone                      = "CP_CONTEXT_DONE",                          CP[11] => 11, 28;
    CpCacheFlush                       = "CP_CACHE_FLUSH",                           CP[12] => 12, 29;
    CpLongPreemptions                  = "CP_LONG_PREEMPTIONS",                      CP[13] => 13, 30;

    // RBBM
    RbbmAlwaysCount                    = "RBBM_ALWAYS_COUNT",                        RBBM[0] => 0, 0;
    RbbmAlwaysOn                       = "RBBM_ALWAYS_ON",                           RBBM[1] => 1, 1;
    RbbmTseBusy                        = "RBBM_TSE_BUSY",                            RBBM[2] => 2, 2;
    RbbmRasBusy                        = "RBBM_RAS_BUSY",                            RBBM[3] => 3, 3;
    RbbmPcDcallBusy                    = "RBBM_PC_DCALL_BUSY",                       RBBM[4] => 4, 4;
    RbbmPcVsdBusy                      = "RBBM_PC_VSD_BUSY",                         RBBM[5] => 5, 5;
    RbbmStatusMasked                   = "RBBM_STATUS_MASKED",                       RBBM[6] => 6, 6;
    RbbmComBusy                        = "RBBM_COM_BUSY",                            RBBM[7] => 7, 7;
    RbbmDcomBusy                       = "RBBM_DCOM_BUSY",                           RBBM[8] => 8, 8;
    RbbmVbifBusy                       = "RBBM_VBIF_BUSY",                           RBBM[9] => 9, 9;
    RbbmVscBusy                        = "RBBM_VSC_BUSY",                            RBBM[10] => 10, 10;
    RbbmTessBusy                       = "RBBM_TESS_BUSY",                           RBBM[11] => 11, 11;
    RbbmUcheBusy                       = "RBBM_UCHE_BUSY",                           RBBM[12] => 12, 12;
    RbbmHlsqBusy                       = "RBBM_HLSQ_BUSY",                           RBBM[13] => 13, 13;

    // PC
    PcBusyCycles                       = "PC_BUSY_CYCLES",                           PC[0] => 0, 0;
    PcWorkingCycles                    = "PC_WORKING_CYCLES",                        PC[1] => 1, 1;
    PcStallCyclesVfd                   = "PC_STALL_CYCLES_VFD",                      PC[2] => 2, 2;
    PcStallCyclesTse                   = "PC_STALL_CYCLES_TSE",                      PC[3] => 3, 3;
    PcStallCyclesVpc                   = "PC_STALL_CYCLES_VPC",                      PC[4] => 4, 4;
    PcStallCyclesUche                  = "PC_STALL_CYCLES_UCHE",                     PC[5] => 5, 5;
    PcStallCyclesTess                  = "PC_STALL_CYCLES_TESS",                     PC[6] => 6, 6;
    PcStallCyclesTseOnly               = "PC_STALL_CYCLES_TSE_ONLY",                 PC[7] => 7, 7;
    PcStallCyclesVpcOnly               = "PC_STALL_CYCLES_VPC_ONLY",                 PC[8] => 8, 8;
    PcPass1TfStallCycles               = "PC_PASS1_TF_STALL_CYCLES",                 PC[9] => 9, 9;
    PcStarveCyclesForIndex             = "PC_STARVE_CYCLES_FOR_INDEX",               PC[10] => 10, 10;
    PcStarveCyclesForTessFactor        = "PC_STARVE_CYCLES_FOR_TESS_FACTOR",         PC[11] => 11, 11;
    PcStarveCyclesForVizStream         = "PC_STARVE_CYCLES_FOR_VIZ_STREAM",          PC[12] => 12, 12;
    PcStarveCyclesForPosition          = "PC_STARVE_CYCLES_FOR_POSITION",            PC[13] => 13, 13;
    PcStarveCyclesDi                   = "PC_STARVE_CYCLES_DI",                      PC[14] => 14, 14;
    PcVisStreamsLoaded                 = "PC_VIS_STREAMS_LOADED",                    PC[15] => 15, 15;
    PcInstances                        = "PC_INSTANCES",                             PC[16] => 16, 16;
    PcVpcPrimitives                    = "PC_VPC_PRIMITIVES",                        PC[17] => 17, 17;
    PcDeadPrim                         = "PC_DEAD_PRIM",                             PC[18] => 18, 18;
    PcLivePrim                         = "PC_LIVE_PRIM",                             PC[19] => 19, 19;
    PcVertexHits                       = "PC_VERTEX_HITS",                           PC[20] => 20, 20;
    PcIaVertices                       = "PC_IA_VERTICES",                           PC[21] => 21, 21;
    PcIaPrimitives                     = "PC_IA_PRIMITIVES",                         PC[22] => 22, 22;
    PcGsPrimitives                     = "PC_GS_PRIMITIVES",                         PC[23] => 23, 23;
    PcHsInvocations                    = "PC_HS_INVOCATIONS",                        PC[24] => 24, 24;
    PcDsInvocations                    = "PC_DS_INVOCATIONS",                        PC[25] => 25, 25;
    PcVsInvocations                    = "PC_VS_INVOCATIONS",                        PC[26] => 26, 26;
    PcGsInvocations                    = "PC_GS_INVOCATIONS",                        PC[27] => 27, 27;
    PcDsPrimitives                     = "PC_DS_PRIMITIVES",                         PC[28] => 28, 28;
    PcVpcPosDataTransaction            = "PC_VPC_POS_DATA_TRANSACTION",              PC[29] => 29, 29;
    Pc3dDrawcalls                      = "PC_3D_DRAWCALLS",                          PC[30] => 30, 30;
    Pc2dDrawcalls                      = "PC_2D_DRAWCALLS",                          PC[31] => 31, 31;
    PcNonDrawcallGlobalEvents          = "PC_NON_DRAWCALL_GLOBAL_EVENTS",            PC[32] => 32, 32;
    PcTessBusyCycles                   = "PC_TESS_BUSY_CYCLES",                      PC[33] => 33, 33;
    PcTessWorkingCycles                = "PC_TESS_WORKING_CYCLES",                   PC[34] => 34, 34;
    PcTessStallCyclesPc                = "PC_TESS_STALL_CYCLES_PC",                  PC[35] => 35, 35;
    PcTessStarveCyclesPc               = "PC_TESS_STARVE_CYCLES_PC",                 PC[36] => 36, 36;

    // VFD
    VfdBusyCycles                      = "VFD_BUSY_CYCLES",                          VFD[0] => 0, 0;
    VfdStallCyclesUche                 = "VFD_STALL_CYCLES_UCHE",                    VFD[1] => 1, 1;
    VfdStallCyclesVpcAlloc             = "VFD_STALL_CYCLES_VPC_ALLOC",               VFD[2] => 2, 2;
    VfdStallCyclesSpInfo               = "VFD_STALL_CYCLES_SP_INFO",                 VFD[3] => 3, 5;
    VfdStallCyclesSpAttr               = "VFD_STALL_CYCLES_SP_ATTR",                 VFD[4] => 4, 6;
    VfdStarveCyclesUche                = "VFD_STARVE_CYCLES_UCHE",                   VFD[5] => 5, 10;
    VfdRbufferFull                     = "VFD_RBUFFER_FULL",                         VFD[6] => 6, 11;
    VfdAttrInfoFifoFull                = "VFD_ATTR_INFO_FIFO_FULL",                  VFD[7] => 7, 12;
    VfdDecodedAttributeBytes           = "VFD_DECODED_ATTRIBUTE_BYTES",              VFD[8] => 8, 13;
    VfdNumAttributes                   = "VFD_NUM_ATTRIBUTES",                       VFD[9] => 9, 14;
    VfdUpperShaderFibers               = "VFD_UPPER_SHADER_FIBERS",                  VFD[10] => 10, 16;
    VfdLowerShaderFibers               = "VFD_LOWER_SHADER_FIBERS",                  VFD[11] => 11, 17;
    VfdMode0Fibers                     = "VFD_MODE_0_FIBERS",                        VFD[12] => 12, 18;
    VfdMode1Fibers                     = "VFD_MODE_1_FIBERS",                        VFD[13] => 13, 19;
    VfdMode2Fibers                     = "VFD_MODE_2_FIBERS",                        VFD[14] => 14, 20;
    VfdMode3Fibers                     = "VFD_MODE_3_FIBERS",                        VFD[15] => 15, 21;
    VfdMode4Fibers                     = "VFD_MODE_4_FIBERS",                        VFD[16] => 16, 22;
    VfdTotalVertices                   = "VFD_TOTAL_VERTICES",                       VFD[17] => 17, 23;
    VfdVfdpStallCyclesVfd              = "VFD_VFDP_STALL_CYCLES_VFD",                VFD[18] => 18, 26;
    VfdVfdpStallCyclesVfdIndex         = "VFD_VFDP_STALL_CYCLES_VFD_INDEX",          VFD[19] => 19, 27;
    VfdVfdpStallCyclesVfdProg          = "VFD_VFDP_STALL_CYCLES_VFD_PROG",           VFD[20] => 20, 28;
    VfdVfdpStarveCyclesPc              = "VFD_VFDP_STARVE_CYCLES_PC",                VFD[21] => 21, 29;

    // HLSQ
    HlsqBusyCycles                     = "HLSQ_BUSY_CYCLES",                         HLSQ[0] => 0, 0;
    HlsqStallCyclesUche                = "HLSQ_STALL_CYCLES_UCHE",                   HLSQ[1] => 1, 1;
    HlsqStallCyclesSpState             = "HLSQ_STALL_CYCLES_SP_STATE",               HLSQ[2] => 2, 2;
    HlsqStallCyclesSpFsStage           = "HLSQ_STALL_CYCLES_SP_FS_STAGE",            HLSQ[3] => 3, 3;
    HlsqUcheLatencyCycles              = "HLSQ_UCHE_LATENCY_CYCLES",                 HLSQ[4] => 4, 4;
    HlsqUcheLatencyCount               = "HLSQ_UCHE_LATENCY_COUNT",                  HLSQ[5] => 5, 5;
    HlsqQuads                          = "HLSQ_QUADS",                               HLSQ[6] => 8, 8;
    HlsqCsInvocations                  = "HLSQ_CS_INVOCATIONS",                      HLSQ[7] => 9, 13;
    HlsqComputeDrawcalls               = "HLSQ_COMPUTE_DRAWCALLS",                   HLSQ[8] => 10, 14;

    // VPC
    VpcBusyCycles                      = "VPC_BUSY_CYCLES",                          VPC[0] => 0, 0;
    VpcWorkingCycles                   = "VPC_WORKING_CYCLES",                       VPC[1] => 1, 1;
    VpcStallCyclesUche                 = "VPC_STALL_CYCLES_UCHE",                    VPC[2] => 2, 2;
    VpcStallCyclesVfdWack              = "VPC_STALL_CYCLES_VFD_WACK",                VPC[3] => 3, 3;
    VpcStallCyclesHlsqPrimAlloc        = "VPC_STALL_CYCLES_HLSQ_PRIM_ALLOC",         VPC[4] => 4, 4;
    VpcStallCyclesPc                   = "VPC_STALL_CYCLES_PC",                      VPC[5] => 5, 5;
    VpcStallCyclesSpLm                 = "VPC_STALL_CYCLES_SP_LM",                   VPC[6] => 6, 6;
    VpcStarveCyclesSp                  = "VPC_STARVE_CYCLES_SP",                     VPC[7] => 7, 8;
    VpcStarveCyclesLrz                 = "VPC_STARVE_CYCLES_LRZ",                    VPC[8] => 8, 9;
    VpcPcPrimitives                    = "VPC_PC_PRIMITIVES",                        VPC[9] => 9, 10;
    VpcSpComponents                    = "VPC_SP_COMPONENTS",                        VPC[10] => 10, 11;

    // TSE
    TseBusyCycles                      = "TSE_BUSY_CYCLES",                          TSE[0] => 0, 0;
    TseClippingCycles                  = "TSE_CLIPPING_CYCLES",                      TSE[1] => 1, 1;
    TseStallCyclesRas                  = "TSE_STALL_CYCLES_RAS",                     TSE[2] => 2, 2;
    TseStallCyclesLrzBaryplane         = "TSE_STALL_CYCLES_LRZ_BARYPLANE",           TSE[3] => 3, 3;
    TseStallCyclesLrzZplane            = "TSE_STALL_CYCLES_LRZ_ZPLANE",              TSE[4] => 4, 4;
    TseStarveCyclesPc                  = "TSE_STARVE_CYCLES_PC",                     TSE[5] => 5, 5;
    TseInputPrim                       = "TSE_INPUT_PRIM",                           TSE[6] => 6, 6;
    TseInputNullPrim                   = "TSE_INPUT_NULL_PRIM",                      TSE[7] => 7, 7;
    TseTrivalRejPrim                   = "TSE_TRIVAL_REJ_PRIM",                      TSE[8] => 8, 8;
    TseClippedPrim                     = "TSE_CLIPPED_PRIM",                         TSE[9] => 9, 9;
    TseZeroAreaPrim                    = "TSE_ZERO_AREA_PRIM",                       TSE[10] => 10, 10;
    TseFacenessCulledPrim              = "TSE_FACENESS_CULLED_PRIM",                 TSE[11] => 11, 11;
    TseZeroPixelPrim                   = "TSE_ZERO_PIXEL_PRIM",                      TSE[12] => 12, 12;
    TseOutputNullPrim                  = "TSE_OUTPUT_NULL_PRIM",                     TSE[13] => 13, 13;
    TseOutputVisiblePrim               = "TSE_OUTPUT_VISIBLE_PRIM",                  TSE[14] => 14, 14;
    TseCinvocation                     = "TSE_CINVOCATION",                          TSE[15] => 15, 15;
    TseCprimitives                     = "TSE_CPRIMITIVES",                          TSE[16] => 16, 16;
    Tse2dInputPrim                     = "TSE_2D_INPUT_PRIM",                        TSE[17] => 17, 17;

    // RAS
    RasBusyCycles                      = "RAS_BUSY_CYCLES",                          RAS[0] => 0, 0;
    RasSupertileActiveCycles           = "RAS_SUPERTILE_ACTIVE_CYCLES",              RAS[1] => 1, 1;
    RasStallCyclesLrz                  = "RAS_STALL_CYCLES_LRZ",                     RAS[2] => 2, 2;
    RasStarveCyclesTse                 = "RAS_STARVE_CYCLES_TSE",                    RAS[3] => 3, 3;
    RasSuperTiles                      = "RAS_SUPER_TILES",                          RAS[4] => 4, 4;
    Ras8x4Tiles                        = "RAS_8X4_TILES",                            RAS[5] => 5, 5;
    RasMaskgenActive                   = "RAS_MASKGEN_ACTIVE",                       RAS[6] => 6, 6;
    RasFullyCoveredSuperTiles          = "RAS_FULLY_COVERED_SUPER_TILES",            RAS[7] => 7, 7;
    RasFullyCovered8x4Tiles            = "RAS_FULLY_COVERED_8X4_TILES",              RAS[8] => 8, 8;
    RasPrimKilledInvisilbe             = "RAS_PRIM_KILLED_INVISILBE",                RAS[9] => 9, 9;

    // UCHE
    UcheBusyCycles                     = "UCHE_BUSY_CYCLES",                         UCHE[0] => 0, 0;
    UcheVbifLatencyCycles              = "UCHE_VBIF_LATENCY_CYCLES",                 UCHE[1] => 2, 2;
    UcheVbifLatencySamples             = "UCHE_VBIF_LATENCY_SAMPLES",                UCHE[2] => 3, 3;
    UcheVbifReadBeatsTp                = "UCHE_VBIF_READ_BEATS_TP",                  UCHE[3] => 4, 4;
    UcheVbifReadBeatsVfd               = "UCHE_VBIF_READ_BEATS_VFD",                 UCHE[4] => 5, 5;
    UcheVbifReadBeatsHlsq              = "UCHE_VBIF_READ_BEATS_HLSQ",                UCHE[5] => 6, 6;
    UcheVbifReadBeatsLrz               = "UCHE_VBIF_READ_BEATS_LRZ",                 UCHE[6] => 7, 7;
    UcheVbifReadBeatsSp                = "UCHE_VBIF_READ_BEATS_SP",                  UCHE[7] => 8, 8;
    UcheReadRequestsTp                 = "UCHE_READ_REQUESTS_TP",                    UCHE[8] => 9, 9;
    UcheReadRequestsVfd                = "UCHE_READ_REQUESTS_VFD",                   UCHE[9] => 10, 10;
    UcheReadRequestsHlsq               = "UCHE_READ_REQUESTS_HLSQ",                  UCHE[10] => 11, 11;
    UcheReadRequestsLrz                = "UCHE_READ_REQUESTS_LRZ",                   UCHE[11] => 12, 12;
    UcheReadRequestsSp                 = "UCHE_READ_REQUESTS_SP",                    UCHE[12] => 13, 13;
    UcheWriteRequestsLrz               = "UCHE_WRITE_REQUESTS_LRZ",                  UCHE[13] => 14, 14;
    UcheWriteRequestsSp                = "UCHE_WRITE_REQUESTS_SP",                   UCHE[14] => 15, 15;
    UcheWriteRequestsVpc               = "UCHE_WRITE_REQUESTS_VPC",                  UCHE[15] => 16, 16;
    UcheWriteRequestsVsc               = "UCHE_WRITE_REQUESTS_VSC",                  UCHE[16] => 17, 17;
    UcheEvicts                         = "UCHE_EVICTS",                              UCHE[17] => 18, 18;
    UcheBankReq0                       = "UCHE_BANK_REQ0",                           UCHE[18] => 19, 19;
    UcheBankReq1                       = "UCHE_BANK_REQ1",                           UCHE[19] => 20, 20;
    UcheBankReq2                       = "UCHE_BANK_REQ2",                           UCHE[20] => 21, 21;
    UcheBankReq3                       = "UCHE_BANK_REQ3",                           UCHE[21] => 22, 22;
    UcheBankReq4                       = "UCHE_BANK_REQ4",                           UCHE[22] => 23, 23;
    UcheBankReq5                       = "UCHE_BANK_REQ5",                           UCHE[23] => 24, 24;
    UcheBankReq6                       = "UCHE_BANK_REQ6",                           UCHE[24] => 25, 25;
    UcheBankReq7                       = "UCHE_BANK_REQ7",                           UCHE[25] => 26, 26;
    UcheVbifReadBeatsCh0               = "UCHE_VBIF_READ_BEATS_CH0",                 UCHE[26] => 27, 27;
    UcheVbifReadBeatsCh1               = "UCHE_VBIF_READ_BEATS_CH1",                 UCHE[27] => 28, 28;
    UcheGmemReadBeats                  = "UCHE_GMEM_READ_BEATS",                     UCHE[28] => 29, 29;

    // TP
    TpBusyCycles                       = "TP_BUSY_CYCLES",                           TP[0] => 0, 0;
    TpStallCyclesUche                  = "TP_STALL_CYCLES_UCHE",                     TP[1] => 1, 1;
    TpLatencyCycles                    = "TP_LATENCY_CYCLES",                        TP[2] => 2, 2;
    TpLatencyTrans                     = "TP_LATENCY_TRANS",                         TP[3] => 3, 3;
    TpFlagCacheRequestSamples          = "TP_FLAG_CACHE_REQUEST_SAMPLES",            TP[4] => 4, 4;
    TpFlagCacheRequestLatency          = "TP_FLAG_CACHE_REQUEST_LATENCY",            TP[5] => 5, 5;
    TpL1CachelineRequests              = "TP_L1_CACHELINE_REQUESTS",                 TP[6] => 6, 6;
    TpL1CachelineMisses                = "TP_L1_CACHELINE_MISSES",                   TP[7] => 7, 7;
    TpSpTpTrans                        = "TP_SP_TP_TRANS",                           TP[8] => 8, 8;
    TpTpSpTrans                        = "TP_TP_SP_TRANS",                           TP[9] => 9, 9;
    TpOutputPixels                     = "TP_OUTPUT_PIXELS",                         TP[10] => 10, 10;
    TpFilterWorkload16bit              = "TP_FILTER_WORKLOAD_16BIT",                 TP[11] => 11, 11;
    TpFilterWorkload32bit              = "TP_FILTER_WORKLOAD_32BIT",                 TP[12] => 12, 12;
    TpQuadsReceived                    = "TP_QUADS_RECEIVED",                        TP[13] => 13, 13;
    TpQuadsOffset                      = "TP_QUADS_OFFSET",                          TP[14] => 14, 14;
    TpQuadsShadow                      = "TP_QUADS_SHADOW",                          TP[15] => 15, 15;
    TpQuadsArray                       = "TP_QUADS_ARRAY",                           TP[16] => 16, 16;
    TpQuadsGradient                    = "TP_QUADS_GRADIENT",                        TP[17] => 17, 17;
    TpQuads1d                          = "TP_QUADS_1D",                              TP[18] => 18, 18;
    TpQuads2d                          = "TP_QUADS_2D",                              TP[19] => 19, 19;
    TpQuadsBuffer                      = "TP_QUADS_BUFFER",                          TP[20] => 20, 20;
    TpQuads3d                          = "TP_QUADS_3D",                              TP[21] => 21, 21;
    TpQuadsCube                        = "TP_QUADS_CUBE",                            TP[22] => 22, 22;
    TpDivergentQuadsReceived           = "TP_DIVERGENT_QUADS_RECEIVED",              TP[23] => 23, 25;
    TpPrtNonResidentEvents             = "TP_PRT_NON_RESIDENT_EVENTS",               TP[24] => 24, 28;
    TpOutputPixelsPoint                = "TP_OUTPUT_PIXELS_POINT",                   TP[25] => 25, 29;
    TpOutputPixelsBilinear             = "TP_OUTPUT_PIXELS_BILINEAR",                TP[26] => 26, 30;
    TpOutputPixelsMip                  = "TP_OUTPUT_PIXELS_MIP",                     TP[27] => 27, 31;
    TpOutputPixelsAniso                = "TP_OUTPUT_PIXELS_ANISO",                   TP[28] => 28, 32;
    TpOutputPixelsZeroLod              = "TP_OUTPUT_PIXELS_ZERO_LOD",                TP[29] => 29, 33;
    TpFlagCacheRequests                = "TP_FLAG_CACHE_REQUESTS",                   TP[30] => 30, 34;
    TpFlagCacheMisses                  = "TP_FLAG_CACHE_MISSES",                     TP[31] => 31, 35;
    TpL15L2Requests                    = "TP_L1_5_L2_REQUESTS",                      TP[32] => 32, 36;
    Tp2dOutputPixels                   = "TP_2D_OUTPUT_PIXELS",                      TP[33] => 33, 37;
    Tp2dOutputPixelsPoint              = "TP_2D_OUTPUT_PIXELS_POINT",                TP[34] => 34, 38;
    Tp2dOutputPixelsBilinear           = "TP_2D_OUTPUT_PIXELS_BILINEAR",             TP[35] => 35, 39;
    Tp2dFilterWorkload16bit            = "TP_2D_FILTER_WORKLOAD_16BIT",              TP[36] => 36, 40;
    Tp2dFilterWorkload32bit            = "TP_2D_FILTER_WORKLOAD_32BIT",              TP[37] => 37, 41;

    // SP
    SpBusyCycles                       = "SP_BUSY_CYCLES",                           SP[0] => 0, 0;
    SpAluWorkingCycles                 = "SP_ALU_WORKING_CYCLES",                    SP[1] => 1, 1;
    SpEfuWorkingCycles                 = "SP_EFU_WORKING_CYCLES",                    SP[2] => 2, 2;
    SpStallCyclesVpc                   = "SP_STALL_CYCLES_VPC",                      SP[3] => 3, 3;
    SpStallCyclesTp                    = "SP_STALL_CYCLES_TP",                       SP[4] => 4, 4;
    SpStallCyclesUche                  = "SP_STALL_CYCLES_UCHE",                     SP[5] => 5, 5;
    SpStallCyclesRb                    = "SP_STALL_CYCLES_RB",                       SP[6] => 6, 6;
    SpWaveContexts                     = "SP_WAVE_CONTEXTS",                         SP[7] => 8, 8;
    SpWaveContextCycles                = "SP_WAVE_CONTEXT_CYCLES",                   SP[8] => 9, 9;
    SpFsStageWaveCycles                = "SP_FS_STAGE_WAVE_CYCLES",                  SP[9] => 10, 10;
    SpFsStageWaveSamples               = "SP_FS_STAGE_WAVE_SAMPLES",                 SP[10] => 11, 11;
    SpVsStageWaveCycles                = "SP_VS_STAGE_WAVE_CYCLES",                  SP[11] => 12, 12;
    SpVsStageWaveSamples               = "SP_VS_STAGE_WAVE_SAMPLES",                 SP[12] => 13, 13;
    SpFsStageDurationCycles            = "SP_FS_STAGE_DURATION_CYCLES",              SP[13] => 14, 14;
    SpVsStageDurationCycles            = "SP_VS_STAGE_DURATION_CYCLES",              SP[14] => 15, 15;
    SpWaveCtrlCycles                   = "SP_WAVE_CTRL_CYCLES",                      SP[15] => 16, 16;
    SpWaveLoadCycles                   = "SP_WAVE_LOAD_CYCLES",                      SP[16] => 17, 17;
    SpWaveEmitCycles                   = "SP_WAVE_EMIT_CYCLES",                      SP[17] => 18, 18;
    SpWaveNopCycles                    = "SP_WAVE_NOP_CYCLES",                       SP[18] => 19, 19;
    SpWaveWaitCycles                   = "SP_WAVE_WAIT_CYCLES",                      SP[19] => 20, 20;
    SpWaveFetchCycles                  = "SP_WAVE_FETCH_CYCLES",                     SP[20] => 21, 21;
    SpWaveIdleCycles                   = "SP_WAVE_IDLE_CYCLES",                      SP[21] => 22, 22;
    SpWaveEndCycles                    = "SP_WAVE_END_CYCLES",                       SP[22] => 23, 23;
    SpWaveLongSyncCycles               = "SP_WAVE_LONG_SYNC_CYCLES",                 SP[23] => 24, 24;
    SpWaveShortSyncCycles              = "SP_WAVE_SHORT_SYNC_CYCLES",                SP[24] => 25, 25;
    SpWaveJoinCycles                   = "SP_WAVE_JOIN_CYCLES",                      SP[25] => 26, 26;
    SpLmLoadInstructions               = "SP_LM_LOAD_INSTRUCTIONS",                  SP[26] => 27, 27;
    SpLmStoreInstructions              = "SP_LM_STORE_INSTRUCTIONS",                 SP[27] => 28, 28;
    SpLmAtomics                        = "SP_LM_ATOMICS",                            SP[28] => 29, 29;
    SpGmLoadInstructions               = "SP_GM_LOAD_INSTRUCTIONS",                  SP[29] => 30, 30;
    SpGmStoreInstructions              = "SP_GM_STORE_INSTRUCTIONS",                 SP[30] => 31, 31;
    SpGmAtomics                        = "SP_GM_ATOMICS",                            SP[31] => 32, 32;
    SpVsStageTexInstructions           = "SP_VS_STAGE_TEX_INSTRUCTIONS",             SP[32] => 33, 33;
    SpVsStageEfuInstructions           = "SP_VS_STAGE_EFU_INSTRUCTIONS",             SP[33] => 34, 35;
    SpVsStageFullAluInstructions       = "SP_VS_STAGE_FULL_ALU_INSTRUCTIONS",        SP[34] => 35, 36;
    SpVsStageHalfAluInstructions       = "SP_VS_STAGE_HALF_ALU_INSTRUCTIONS",        SP[35] => 36, 37;
    SpFsStageTexInstructions           = "SP_FS_STAGE_TEX_INSTRUCTIONS",             SP[36] => 37, 38;
    SpFsStageCflowInstructions         = "SP_FS_STAGE_CFLOW_INSTRUCTIONS",           SP[37] => 38, 39;
    SpFsStageEfuInstructions           = "SP_FS_STAGE_EFU_INSTRUCTIONS",             SP[38] => 39, 40;
    SpFsStageFullAluInstructions       = "SP_FS_STAGE_FULL_ALU_INSTRUCTIONS",        SP[39] => 40, 41;
    SpFsStageHalfAluInstructions       = "SP_FS_STAGE_HALF_ALU_INSTRUCTIONS",        SP[40] => 41, 42;
    SpFsStageBaryInstructions          = "SP_FS_STAGE_BARY_INSTRUCTIONS",            SP[41] => 42, 43;
    SpVsInstructions                   = "SP_VS_INSTRUCTIONS",                       SP[42] => 43, 44;
    SpFsInstructions                   = "SP_FS_INSTRUCTIONS",                       SP[43] => 44, 45;
    SpAddrLockCount                    = "SP_ADDR_LOCK_COUNT",                       SP[44] => 45, 46;
    SpUcheReadTrans                    = "SP_UCHE_READ_TRANS",                       SP[45] => 46, 47;
    SpUcheWriteTrans                   = "SP_UCHE_WRITE_TRANS",                      SP[46] => 47, 48;
    SpExportVpcTrans                   = "SP_EXPORT_VPC_TRANS",                      SP[47] => 48, 49;
    SpExportRbTrans                    = "SP_EXPORT_RB_TRANS",                       SP[48] => 49, 50;
    SpPixelsKilled                     = "SP_PIXELS_KILLED",                         SP[49] => 50, 51;
    SpIcl1Requests                     = "SP_ICL1_REQUESTS",                         SP[50] => 51, 52;
    SpIcl1Misses                       = "SP_ICL1_MISSES",                           SP[51] => 52, 53;
    SpHsInstructions                   = "SP_HS_INSTRUCTIONS",                       SP[52] => 53, 56;
    SpDsInstructions                   = "SP_DS_INSTRUCTIONS",                       SP[53] => 54, 57;
    SpGsInstructions                   = "SP_GS_INSTRUCTIONS",                       SP[54] => 55, 58;
    SpCsInstructions                   = "SP_CS_INSTRUCTIONS",                       SP[55] => 56, 59;
    SpGprRead                          = "SP_GPR_READ",                              SP[56] => 57, 60;
    SpGprWrite                         = "SP_GPR_WRITE",                             SP[57] => 58, 61;
    SpLmBankConflicts                  = "SP_LM_BANK_CONFLICTS",                     SP[58] => 61, 64;

    // RB
    RbBusyCycles                       = "RB_BUSY_CYCLES",                           RB[0] => 0, 0;
    RbStallCyclesHlsq                  = "RB_STALL_CYCLES_HLSQ",                     RB[1] => 1, 2;
    RbStallCyclesFifo0Full             = "RB_STALL_CYCLES_FIFO0_FULL",               RB[2] => 2, 3;
    RbStallCyclesFifo1Full             = "RB_STALL_CYCLES_FIFO1_FULL",               RB[3] => 3, 4;
    RbStallCyclesFifo2Full             = "RB_STALL_CYCLES_FIFO2_FULL",               RB[4] => 4, 5;
    RbStarveCyclesSp                   = "RB_STARVE_CYCLES_SP",                      RB[5] => 5, 6;
    RbStarveCyclesLrzTile              = "RB_STARVE_CYCLES_LRZ_TILE",                RB[6] => 6, 7;
    RbStarveCyclesCcu                  = "RB_STARVE_CYCLES_CCU",                     RB[7] => 7, 8;
    RbStarveCyclesZPlane               = "RB_STARVE_CYCLES_Z_PLANE",                 RB[8] => 8, 9;
    RbStarveCyclesBaryPlane            = "RB_STARVE_CYCLES_BARY_PLANE",              RB[9] => 9, 10;
    RbZWorkload                        = "RB_Z_WORKLOAD",                            RB[10] => 10, 11;
    RbHlsqActive                       = "RB_HLSQ_ACTIVE",                           RB[11] => 11, 12;
    RbZRead                            = "RB_Z_READ",                                RB[12] => 12, 13;
    RbZWrite                           = "RB_Z_WRITE",                               RB[13] => 13, 14;
    RbCRead                            = "RB_C_READ",                                RB[14] => 14, 15;
    RbCWrite                           = "RB_C_WRITE",                               RB[15] => 15, 16;
    RbTotalPass                        = "RB_TOTAL_PASS",                            RB[16] => 16, 17;
    RbZPass                            = "RB_Z_PASS",                                RB[17] => 17, 18;
    RbZFail                            = "RB_Z_FAIL",                                RB[18] => 18, 19;
    RbSFail                            = "RB_S_FAIL",                                RB[19] => 19, 20;
    RbBlendedFxpComponents             = "RB_BLENDED_FXP_COMPONENTS",                RB[20] => 20, 21;
    RbBlendedFp16Components            = "RB_BLENDED_FP16_COMPONENTS",               RB[21] => 21, 22;
    Rb2dAliveCycles                    = "RB_2D_ALIVE_CYCLES",                       RB[22] => 23, 24;
    Rb2dStallCyclesA2d                 = "RB_2D_STALL_CYCLES_A2D",                   RB[23] => 24, 25;
    Rb2dStarveCyclesSrc                = "RB_2D_STARVE_CYCLES_SRC",                  RB[24] => 25, 26;
    Rb2dStarveCyclesSp                 = "RB_2D_STARVE_CYCLES_SP",                   RB[25] => 26, 27;
    Rb2dStarveCyclesDst                = "RB_2D_STARVE_CYCLES_DST",                  RB[26] => 27, 28;
    Rb2dValidPixels                    = "RB_2D_VALID_PIXELS",                       RB[27] => 28, 29;
    RbStallCyclesCcu                   = "RB_STALL_CYCLES_CCU",                      RB[28] => 44, 1;

    // VSC
    VscBusyCycles                      = "VSC_BUSY_CYCLES",                          VSC[0] => 0, 0;
    VscWorkingCycles                   = "VSC_WORKING_CYCLES",                       VSC[1] => 1, 1;
    VscStallCyclesUche                 = "VSC_STALL_CYCLES_UCHE",                    VSC[2] => 2, 2;
    VscEotNum                          = "VSC_EOT_NUM",                              VSC[3] => 3, 3;

    // CCU
    CcuBusyCycles                      = "CCU_BUSY_CYCLES",                          CCU[0] => 0, 0;
    CcuStallCyclesRbDepthReturn        = "CCU_STALL_CYCLES_RB_DEPTH_RETURN",         CCU[1] => 1, 1;
    CcuStallCyclesRbColorReturn        = "CCU_STALL_CYCLES_RB_COLOR_RETURN",         CCU[2] => 2, 2;
    CcuStarveCyclesFlagReturn          = "CCU_STARVE_CYCLES_FLAG_RETURN",            CCU[3] => 3, 3;
    CcuDepthBlocks                     = "CCU_DEPTH_BLOCKS",                         CCU[4] => 4, 4;
    CcuColorBlocks                     = "CCU_COLOR_BLOCKS",                         CCU[5] => 5, 5;
    CcuDepthBlockHit                   = "CCU_DEPTH_BLOCK_HIT",                      CCU[6] => 6, 6;
    CcuColorBlockHit                   = "CCU_COLOR_BLOCK_HIT",                      CCU[7] => 7, 7;
    CcuPartialBlockRead                = "CCU_PARTIAL_BLOCK_READ",                   CCU[8] => 8, 8;
    CcuGmemRead                        = "CCU_GMEM_READ",                            CCU[9] => 9, 9;
    CcuGmemWrite                       = "CCU_GMEM_WRITE",                           CCU[10] => 10, 10;
    CcuDepthReadFlag0Count             = "CCU_DEPTH_READ_FLAG0_COUNT",               CCU[11] => 11, 11;
    CcuDepthReadFlag1Count             = "CCU_DEPTH_READ_FLAG1_COUNT",               CCU[12] => 12, 12;
    CcuDepthReadFlag2Count             = "CCU_DEPTH_READ_FLAG2_COUNT",               CCU[13] => 13, 13;
    CcuDepthReadFlag3Count             = "CCU_DEPTH_READ_FLAG3_COUNT",               CCU[14] => 14, 14;
    CcuDepthReadFlag4Count             = "CCU_DEPTH_READ_FLAG4_COUNT",               CCU[15] => 15, 15;
    CcuColorReadFlag0Count             = "CCU_COLOR_READ_FLAG0_COUNT",               CCU[16] => 19, 16;
    CcuColorReadFlag1Count             = "CCU_COLOR_READ_FLAG1_COUNT",               CCU[17] => 20, 17;
    CcuColorReadFlag2Count             = "CCU_COLOR_READ_FLAG2_COUNT",               CCU[18] => 21, 18;
    CcuColorReadFlag3Count             = "CCU_COLOR_READ_FLAG3_COUNT",               CCU[19] => 22, 19;
    CcuColorReadFlag4Count             = "CCU_COLOR_READ_FLAG4_COUNT",               CCU[20] => 23, 20;
    Ccu2dRdReq                         = "CCU_2D_RD_REQ",                            CCU[21] => 27, 22;
    Ccu2dWrReq                         = "CCU_2D_WR_REQ",                            CCU[22] => 28, 23;

    // LRZ
    LrzBusyCycles                      = "LRZ_BUSY_CYCLES",                          LRZ[0] => 0, 0;
    LrzStarveCyclesRas                 = "LRZ_STARVE_CYCLES_RAS",                    LRZ[1] => 1, 1;
    LrzStallCyclesRb                   = "LRZ_STALL_CYCLES_RB",                      LRZ[2] => 2, 2;
    LrzStallCyclesVsc                  = "LRZ_STALL_CYCLES_VSC",                     LRZ[3] => 3, 3;
    LrzStallCyclesVpc                  = "LRZ_STALL_CYCLES_VPC",                     LRZ[4] => 4, 4;
    LrzStallCyclesFlagPrefetch         = "LRZ_STALL_CYCLES_FLAG_PREFETCH",           LRZ[5] => 5, 5;
    LrzStallCyclesUche                 = "LRZ_STALL_CYCLES_UCHE",                    LRZ[6] => 6, 6;
    LrzLrzRead                         = "LRZ_LRZ_READ",                             LRZ[7] => 7, 7;
    LrzLrzWrite                        = "LRZ_LRZ_WRITE",                            LRZ[8] => 8, 8;
    LrzReadLatency                     = "LRZ_READ_LATENCY",                         LRZ[9] => 9, 9;
    LrzMergeCacheUpdating              = "LRZ_MERGE_CACHE_UPDATING",                 LRZ[10] => 10, 10;
    LrzPrimKilledByMaskgen             = "LRZ_PRIM_KILLED_BY_MASKGEN",               LRZ[11] => 11, 11;
    LrzPrimKilledByLrz                 = "LRZ_PRIM_KILLED_BY_LRZ",                   LRZ[12] => 12, 12;
    LrzVisiblePrimAfterLrz             = "LRZ_VISIBLE_PRIM_AFTER_LRZ",               LRZ[13] => 13, 13;
    LrzFull8x8Tiles                    = "LRZ_FULL_8X8_TILES",                       LRZ[14] => 14, 14;
    LrzPartial8x8Tiles                 = "LRZ_PARTIAL_8X8_TILES",                    LRZ[15] => 15, 15;
    LrzTileKilled                      = "LRZ_TILE_KILLED",                          LRZ[16] => 16, 16;
    LrzTotalPixel                      = "LRZ_TOTAL_PIXEL",                          LRZ[17] => 17, 17;
    LrzVisiblePixelAfterLrz            = "LRZ_VISIBLE_PIXEL_AFTER_LRZ",              LRZ[18] => 18, 18;

    // CMP
    CmpCmpdecmpVbifLatencyCycles       = "CMP_CMPDECMP_VBIF_LATENCY_CYCLES",         CMP[0] => 1, 1;
    CmpCmpdecmpVbifLatencySamples      = "CMP_CMPDECMP_VBIF_LATENCY_SAMPLES",        CMP[1] => 2, 2;
    CmpCmpdecmpVbifReadDataCcu         = "CMP_CMPDECMP_VBIF_READ_DATA_CCU",          CMP[2] => 3, 3;
    CmpCmpdecmpVbifWriteDataCcu        = "CMP_CMPDECMP_VBIF_WRITE_DATA_CCU",         CMP[3] => 4, 4;
    CmpCmpdecmpVbifReadRequest         = "CMP_CMPDECMP_VBIF_READ_REQUEST",           CMP[4] => 5, 5;
    CmpCmpdecmpVbifWriteRequest        = "CMP_CMPDECMP_VBIF_WRITE_REQUEST",          CMP[5] => 6, 6;
    CmpCmpdecmpVbifReadData            = "CMP_CMPDECMP_VBIF_READ_DATA",              CMP[6] => 7, 7;
    CmpCmpdecmpVbifWriteData           = "CMP_CMPDECMP_VBIF_WRITE_DATA",             CMP[7] => 8, 8;
    CmpCmpdecmpFlagFetchCycles         = "CMP_CMPDECMP_FLAG_FETCH_CYCLES",           CMP[8] => 9, 9;
    CmpCmpdecmpFlagFetchSamples        = "CMP_CMPDECMP_FLAG_FETCH_SAMPLES",          CMP[9] => 10, 10;
    CmpCmpdecmpDepthWriteFlag1Count    = "CMP_CMPDECMP_DEPTH_WRITE_FLAG1_COUNT",     CMP[10] => 11, 11;
    CmpCmpdecmpDepthWriteFlag2Count    = "CMP_CMPDECMP_DEPTH_WRITE_FLAG2_COUNT",     CMP[11] => 12, 12;
    CmpCmpdecmpDepthWriteFlag3Count    = "CMP_CMPDECMP_DEPTH_WRITE_FLAG3_COUNT",     CMP[12] => 13, 13;
    CmpCmpdecmpDepthWriteFlag4Count    = "CMP_CMPDECMP_DEPTH_WRITE_FLAG4_COUNT",     CMP[13] => 14, 14;
    CmpCmpdecmpColorWriteFlag1Count    = "CMP_CMPDECMP_COLOR_WRITE_FLAG1_COUNT",     CMP[14] => 18, 15;
    CmpCmpdecmpColorWriteFlag2Count    = "CMP_CMPDECMP_COLOR_WRITE_FLAG2_COUNT",     CMP[15] => 19, 16;
    CmpCmpdecmpColorWriteFlag3Count    = "CMP_CMPDECMP_COLOR_WRITE_FLAG3_COUNT",     CMP[16] => 20, 17;
    CmpCmpdecmpColorWriteFlag4Count    = "CMP_CMPDECMP_COLOR_WRITE_FLAG4_COUNT",     CMP[17] => 21, 18;
    CmpCmpdecmp2dStallCyclesVbifReq    = "CMP_CMPDECMP_2D_STALL_CYCLES_VBIF_REQ",    CMP[18] => 25, 19;
    CmpCmpdecmp2dStallCyclesVbifWr     = "CMP_CMPDECMP_2D_STALL_CYCLES_VBIF_WR",     CMP[19] => 26, 20;
    CmpCmpdecmp2dStallCyclesVbifReturn = "CMP_CMPDECMP_2D_STALL_CYCLES_VBIF_RETURN", CMP[20] => 27, 21;
    CmpCmpdecmp2dRdData                = "CMP_CMPDECMP_2D_RD_DATA",                  CMP[21] => 28, 22;
    CmpCmpdecmp2dWrData                = "CMP_CMPDECMP_2D_WR_DATA",                  CMP[22] => 29, 23;
}

impl AdrenoCounter {
    /// KGSL perfcounter group of this counter
    pub const fn group(self) -> u32 {
        super::group_of(self.raw())
    }
}

impl Counter for AdrenoCounter {
    type Generation = AdrenoSeries;

    fn name(&self) -> Cow<'static, str> {
        Cow::Borrowed(self.hardware_name())
    }

    fn encode(self, series: AdrenoSeries) -> HpcResult<CounterSlot> {
        let selector = self.selector(series).ok_or_else(|| unsupported(&self, series))?;
        Ok(CounterSlot::new(self.group(), selector))
    }
}

/// A6xx-only counter addressed directly by its packed `(group << 8) | selector`
///
/// These bypass the cross-series table and are rejected on every other series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct A6xxCounter(u32);

impl A6xxCounter {
    /// Build a counter from a KGSL group and a countable selector
    pub const fn new(group_id: u32, selector: u32) -> Self {
        Self((group_id << GROUP_SHIFT) | (selector & super::SELECTOR_MASK))
    }

    /// Wrap an already packed value
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Packed value of the counter
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl Counter for A6xxCounter {
    type Generation = AdrenoSeries;

    fn name(&self) -> Cow<'static, str> {
        Cow::Owned(format!("A6XX_COUNTER_{:#06x}", self.0))
    }

    fn encode(self, series: AdrenoSeries) -> HpcResult<CounterSlot> {
        match series {
            AdrenoSeries::A6xx => Ok(CounterSlot::from_packed(self.0)),
            AdrenoSeries::A5xx | AdrenoSeries::Unknown => Err(unsupported(&self, series)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HpcError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_table_size_and_unique_ids() {
        assert_eq!(AdrenoCounter::ALL.len(), 359);
        let mut ids: Vec<u32> = AdrenoCounter::ALL.iter().map(|c| c.raw()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), AdrenoCounter::ALL.len());
    }

    #[test]
    fn test_group_comes_from_high_bits() {
        assert_eq!(AdrenoCounter::CpAlwaysCount.group(), kgsl_group::CP);
        assert_eq!(AdrenoCounter::SpBusyCycles.group(), kgsl_group::SP);
        assert_eq!(AdrenoCounter::LrzBusyCycles.group(), kgsl_group::LRZ);
        for counter in AdrenoCounter::ALL {
            assert_eq!(counter.group(), counter.raw() >> 8);
        }
    }

    #[test]
    fn test_published_selectors() {
        let cases = [
            (AdrenoCounter::CpAlwaysCount, AdrenoSeries::A6xx, CounterSlot::new(0x0, 0)),
            (AdrenoCounter::CpNumPreemptions, AdrenoSeries::A6xx, CounterSlot::new(0x0, 3)),
            (AdrenoCounter::CpNumPreemptions, AdrenoSeries::A5xx, CounterSlot::new(0x0, 20)),
            (AdrenoCounter::HlsqQuads, AdrenoSeries::A6xx, CounterSlot::new(0x4, 8)),
            (AdrenoCounter::CmpCmpdecmpVbifLatencyCycles, AdrenoSeries::A6xx, CounterSlot::new(0x1A, 1)),
        ];
        for (counter, series, expected) in cases {
            assert_eq!(counter.encode(series).unwrap(), expected, "{counter} on {series}");
        }
    }

    #[test]
    fn test_every_counter_encodes_on_known_series() {
        for series in [AdrenoSeries::A6xx, AdrenoSeries::A5xx] {
            for counter in AdrenoCounter::ALL {
                let slot = counter.encode(series).unwrap();
                assert_eq!(slot.group_id, counter.group());
            }
        }
    }

    #[test]
    fn test_unknown_series_is_rejected() {
        let err = AdrenoCounter::CpAlwaysCount.encode(AdrenoSeries::Unknown).unwrap_err();
        assert!(matches!(err, HpcError::UnsupportedCounter { .. }));
    }

    #[test]
    fn test_a6xx_counter_only_on_a6xx() {
        let counter = A6xxCounter::new(kgsl_group::SP, 42);
        assert_eq!(counter.encode(AdrenoSeries::A6xx).unwrap(), CounterSlot::new(0xA, 42));
        assert!(matches!(
            counter.encode(AdrenoSeries::A5xx),
            Err(HpcError::UnsupportedCounter { .. })
        ));
    }

    #[test]
    fn test_lookup_by_name_and_raw() {
        let counter: AdrenoCounter = "sp_busy_cycles".parse().unwrap();
        assert_eq!(counter, AdrenoCounter::SpBusyCycles);
        assert_eq!(AdrenoCounter::from_raw(counter.raw()), Some(counter));
        assert!("NOT_A_COUNTER".parse::<AdrenoCounter>().is_err());
    }
}
