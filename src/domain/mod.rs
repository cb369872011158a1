// ==========================================
// 新生学年排课推导系统 - 领域模型层
// ==========================================
// 职责: 定义课程/课表/修改日志等领域实体与类型
// 红线: 不含推导逻辑, 不含数据访问逻辑
// ==========================================

pub mod catalogue;
pub mod course;
pub mod credit;
pub mod curriculum;
pub mod mod_log;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use catalogue::Catalogue;
pub use course::{CourseCode, CourseRecord, CourseRef};
pub use credit::{ApTestRule, CreditEvent, CreditTables, ScoreBand, TransferCreditRule};
pub use curriculum::{BasePlanTemplate, CurriculumData, CurriculumError};
pub use mod_log::{EventId, ModEntry, ModLog, Operation};
pub use schedule::{Schedule, ScheduleSlot, SlotKey};
pub use types::{Category, CreditStatus, Quarter, SlotKind};
