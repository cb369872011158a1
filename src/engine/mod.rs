// ==========================================
// 新生学年排课推导系统 - 引擎层
// ==========================================
// 职责: 课表推导业务规则 (可排性判定/课程替补/结构修正/事件翻译/重算编排)
// 红线: 引擎只操作内存状态, 不做 I/O; 约束不满足必须输出诊断
// ==========================================

pub mod eligibility;
pub mod filler;
pub mod recompute;
pub mod structure;
pub mod substitution;
pub mod translator;

#[cfg(test)]
pub mod test_support;

// 重导出核心引擎
pub use eligibility::EligibilityCore;
pub use filler::CoreFiller;
pub use recompute::{RecomputeError, RecomputeResult, RecomputeSession};
pub use structure::{Diagnostic, StructureCorrector};
pub use substitution::SubstitutionEngine;
pub use translator::CreditTranslator;
