// ==========================================
// 新生学年排课推导系统 - 学分事件翻译器
// ==========================================
// 职责: 将外部学分事件映射为原语操作列表 (纯函数)
// 红线: 规则表查找未命中按空操作处理并告警, 不中断重算
// ==========================================

use crate::config::TranslatorRules;
use crate::domain::credit::{CreditEvent, CreditTables};
use crate::domain::mod_log::Operation;
use tracing::{debug, warn};

// ==========================================
// CreditTranslator - 学分事件翻译器
// ==========================================
pub struct CreditTranslator {
    rules: TranslatorRules,
}

impl CreditTranslator {
    /// 创建新的学分事件翻译器
    pub fn new(rules: TranslatorRules) -> Self {
        Self { rules }
    }

    /// 翻译单个学分事件
    ///
    /// # 规则
    /// - 入学测试 / 编程经历: 固定折抵列表 (配置)
    /// - 转学分: 按标识查规则表, 折抵其全部课程
    /// - AP 考试: 按标识查规则表, 取成绩命中的首个区间;
    ///   标识未知或成绩未达任何区间时产生空操作列表
    pub fn translate(&self, event: &CreditEvent, tables: &CreditTables) -> Vec<Operation> {
        match event {
            CreditEvent::ReadinessExam => self
                .rules
                .readiness_exam_fulfillment
                .iter()
                .map(|code| Operation::RemoveCourse { code: code.clone() })
                .collect(),

            CreditEvent::ProgrammingExperience => self
                .rules
                .programming_experience_fulfillment
                .iter()
                .map(|code| Operation::RemoveCourse { code: code.clone() })
                .collect(),

            CreditEvent::TransferCredit { id } => {
                let Some(rule) = tables.transfer_credits.get(id) else {
                    warn!(id = %id, "转学分规则不存在, 产生空操作列表");
                    return Vec::new();
                };
                rule.fulfillment
                    .iter()
                    .map(|reference| Operation::RemoveCourse {
                        code: reference.code.clone(),
                    })
                    .collect()
            }

            CreditEvent::ApTest { id, score } => {
                let Some(rule) = tables.ap_tests.get(id) else {
                    warn!(id = %id, "AP 考试规则不存在, 产生空操作列表");
                    return Vec::new();
                };
                let Some(band) = rule.band_for_score(*score) else {
                    debug!(id = %id, score, "AP 成绩未达任何折抵区间");
                    return Vec::new();
                };
                band.fulfillment
                    .iter()
                    .map(|reference| Operation::RemoveCourse {
                        code: reference.code.clone(),
                    })
                    .collect()
            }
        }
    }
}
