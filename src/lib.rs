// ==========================================
// 新生学年排课推导系统 - 核心库
// ==========================================
// 技术栈: Rust (纯内存同步推导引擎)
// 系统定位: 课表推导引擎 (展示层与目录数据为外部协作方)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 推导规则
pub mod engine;

// 配置层 - 规则常量
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Category, CreditStatus, Quarter, SlotKind};

// 领域实体
pub use domain::{
    BasePlanTemplate, Catalogue, CourseCode, CourseRecord, CourseRef, CreditEvent, CreditTables,
    CurriculumData, CurriculumError, EventId, ModEntry, ModLog, Operation, Schedule, ScheduleSlot,
    SlotKey,
};

// 引擎
pub use engine::{
    CoreFiller, CreditTranslator, Diagnostic, EligibilityCore, RecomputeError, RecomputeResult,
    RecomputeSession, StructureCorrector, SubstitutionEngine,
};

// 配置
pub use config::{RecomputeConfig, StructureRules, TranslatorRules};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "新生学年排课推导系统";
