// ==========================================
// 新生学年排课推导系统 - 修改日志领域模型
// ==========================================
// 职责: 记录当前生效的学分事件及其派生操作
// 红线: 重放顺序 = 事件首次登记顺序; 撤销事件必须整体撤销其操作
// 说明: 操作为封闭 tagged union, 通过 match 分发,
//       不存在函数名字符串动态调用
// ==========================================

use crate::domain::course::CourseCode;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// EventId - 学分事件标识
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventId {
    ReadinessExam,         // 微积分入学测试 (固定标识)
    ProgrammingExperience, // 编程经历 (固定标识)
    TransferCredit(String), // 转学分选项标识
    ApTest(String),         // AP 考试标识
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::ReadinessExam => write!(f, "READINESS_EXAM"),
            EventId::ProgrammingExperience => write!(f, "PROGRAMMING_EXPERIENCE"),
            EventId::TransferCredit(id) => write!(f, "TRANSFER_CREDIT:{}", id),
            EventId::ApTest(id) => write!(f, "AP_TEST:{}", id),
        }
    }
}

// ==========================================
// Operation - 原语操作
// ==========================================
// 当前仅一种: 折抵并移除课程
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    RemoveCourse { code: CourseCode }, // 折抵学分, 从课表移除并补位
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::RemoveCourse { code } => write!(f, "REMOVE_COURSE({})", code),
        }
    }
}

// ==========================================
// ModEntry - 修改日志条目
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModEntry {
    pub event_id: EventId,          // 来源事件标识
    pub recorded_at: NaiveDateTime, // 首次登记时间
    pub operations: Vec<Operation>, // 派生操作 (有序)
}

// ==========================================
// ModLog - 修改日志
// ==========================================
// 有序条目列表: 同一事件重复登记只更新操作, 保持原位置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModLog {
    entries: Vec<ModEntry>,
}

impl ModLog {
    /// 创建空日志
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记事件的派生操作
    ///
    /// 同一事件已存在时原位更新操作列表 (重放位置不变),
    /// 否则追加到末尾
    pub fn record(&mut self, event_id: EventId, operations: Vec<Operation>) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.event_id == event_id) {
            entry.operations = operations;
            return;
        }
        self.entries.push(ModEntry {
            event_id,
            recorded_at: chrono::Utc::now().naive_utc(),
            operations,
        });
    }

    /// 撤销事件 (连同其全部操作)
    ///
    /// 返回是否确实存在并被移除
    pub fn retract(&mut self, event_id: &EventId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.event_id != *event_id);
        before != self.entries.len()
    }

    /// 按登记顺序遍历条目
    pub fn entries(&self) -> impl Iterator<Item = &ModEntry> {
        self.entries.iter()
    }

    /// 是否包含指定事件
    pub fn contains(&self, event_id: &EventId) -> bool {
        self.entries.iter().any(|e| e.event_id == *event_id)
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
