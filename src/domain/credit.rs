// ==========================================
// 新生学年排课推导系统 - 学分事件领域模型
// ==========================================
// 职责: 外部学分事件与折抵规则表 (AP 考试 / 转学分)
// 说明: 规则表与课程目录同属静态输入, 装载后只读
// ==========================================

use crate::domain::course::CourseRef;
use crate::domain::mod_log::EventId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// CreditEvent - 学分事件
// ==========================================
// 展示层提交的原始输入, 由翻译器转换为原语操作
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditEvent {
    ReadinessExam,                         // 微积分入学测试通过
    ProgrammingExperience,                 // 已有编程经历
    TransferCredit { id: String },         // 转学分选项
    ApTest { id: String, score: u32 },     // AP 考试成绩
}

impl CreditEvent {
    /// 事件标识 (修改日志键)
    pub fn event_id(&self) -> EventId {
        match self {
            CreditEvent::ReadinessExam => EventId::ReadinessExam,
            CreditEvent::ProgrammingExperience => EventId::ProgrammingExperience,
            CreditEvent::TransferCredit { id } => EventId::TransferCredit(id.clone()),
            CreditEvent::ApTest { id, .. } => EventId::ApTest(id.clone()),
        }
    }
}

// ==========================================
// ScoreBand - AP 成绩区间
// ==========================================
// 闭区间 [min_score, max_score], 命中即折抵 fulfillment 内全部课程
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBand {
    pub min_score: u32,               // 最低成绩 (含)
    pub max_score: u32,               // 最高成绩 (含)
    pub fulfillment: Vec<CourseRef>,  // 折抵课程列表
}

impl ScoreBand {
    /// 成绩是否落入区间
    pub fn contains(&self, score: u32) -> bool {
        score >= self.min_score && score <= self.max_score
    }
}

// ==========================================
// ApTestRule - AP 考试折抵规则
// ==========================================
// 单区间与多区间两种原始形态统一为区间列表, 首个命中区间生效
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApTestRule {
    pub name: String,                 // 考试名称 (如 "Calculus BC")
    pub fulfillments: Vec<ScoreBand>, // 成绩区间列表 (有序)
}

impl ApTestRule {
    /// 查找成绩命中的区间
    pub fn band_for_score(&self, score: u32) -> Option<&ScoreBand> {
        self.fulfillments.iter().find(|band| band.contains(score))
    }
}

// ==========================================
// TransferCreditRule - 转学分折抵规则
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferCreditRule {
    pub name: String,                // 选项名称 (如 "Calculus I at a community college")
    pub fulfillment: Vec<CourseRef>, // 折抵课程列表
}

// ==========================================
// CreditTables - 折抵规则表
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreditTables {
    #[serde(default)]
    pub ap_tests: BTreeMap<String, ApTestRule>,              // AP 考试标识 -> 规则
    #[serde(default)]
    pub transfer_credits: BTreeMap<String, TransferCreditRule>, // 转学分标识 -> 规则
}
