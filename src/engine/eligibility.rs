// ==========================================
// 新生学年排课推导系统 - Eligibility Core 纯函数库
// ==========================================
// 职责: 课程在目标学季的可排性判定 (已满足 / 开课 / 先修完成)
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::catalogue::Catalogue;
use crate::domain::course::CourseRecord;
use crate::domain::types::Quarter;
use tracing::warn;

// ==========================================
// EligibilityCore - 纯函数工具类
// ==========================================
pub struct EligibilityCore;

impl EligibilityCore {
    /// 判定课程在目标学季是否已被满足
    ///
    /// # 规则
    /// 1. credit=NOT_EARNED → false
    /// 2. credit=EARNED 且 quarter_taken 为空 (外部折抵) → true
    /// 3. 目标学季为春季 → true (学年末, 任何已获学分都算在前)
    /// 4. 其余情形 → quarter_taken <= 目标学季
    pub fn already_satisfied_by(course: &CourseRecord, quarter: Quarter) -> bool {
        if !course.credit.is_earned() {
            return false;
        }
        let Some(taken) = course.quarter_taken else {
            return true;
        };
        if quarter == Quarter::Spring {
            return true;
        }
        taken <= quarter
    }

    /// 判定课程在目标学季是否开课
    pub fn offered_in(course: &CourseRecord, quarter: Quarter) -> bool {
        course.offering.contains(&quarter)
    }

    /// 判定课程的全部先修课是否在目标学季前完成
    ///
    /// # 规则
    /// 对每条先修引用 (在台账中解析):
    /// 1. 引用无法解析 → false (告警, NotFound 按未完成处理)
    /// 2. credit=NOT_EARNED → false
    /// 3. quarter_taken 为空 (外部折抵) → 视为完成
    /// 4. quarter_taken >= 目标学季 → false (先修必须严格在前, 不得同学季)
    pub fn prereqs_satisfied_by(
        course: &CourseRecord,
        quarter: Quarter,
        ledger: &Catalogue,
    ) -> bool {
        for reference in &course.prerequisites {
            let Some(prereq) = ledger.resolve_ref(reference) else {
                warn!(
                    course = %course.code,
                    reference = %reference,
                    "先修课引用无法解析, 按未完成处理"
                );
                return false;
            };
            if !prereq.credit.is_earned() {
                return false;
            }
            if let Some(taken) = prereq.quarter_taken {
                if taken >= quarter {
                    return false;
                }
            }
        }
        true
    }

    /// 课程在当前学季之后的下一个开课学季
    ///
    /// # 规则
    /// - 秋季 → 冬季开课取冬季, 否则春季开课取春季, 否则 None
    /// - 冬季 → 春季开课取春季, 否则 None
    /// - 春季 → None (学年末)
    pub fn next_offered_quarter(offering: &[Quarter], from: Quarter) -> Option<Quarter> {
        let mut candidate = from.succ();
        while let Some(quarter) = candidate {
            if offering.contains(&quarter) {
                return Some(quarter);
            }
            candidate = quarter.succ();
        }
        None
    }
}
