// ==========================================
// 新生学年排课推导系统 - 领域类型定义
// ==========================================
// 职责: 学季/课程类别/学分状态等基础枚举
// 红线: 学季顺序固定 FALL < WINTER < SPRING
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 学季 (Quarter)
// ==========================================
// 学年内顺序: 秋季 -> 冬季 -> 春季
// 序列化格式: SCREAMING_SNAKE_CASE (与课程数据一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Quarter {
    Fall,   // 秋季
    Winter, // 冬季
    Spring, // 春季
}

impl Quarter {
    /// 学年内全部学季 (按时间顺序)
    pub const ALL: [Quarter; 3] = [Quarter::Fall, Quarter::Winter, Quarter::Spring];

    /// 时间上的下一个学季 (春季为学年末, 返回 None)
    pub fn succ(&self) -> Option<Quarter> {
        match self {
            Quarter::Fall => Some(Quarter::Winter),
            Quarter::Winter => Some(Quarter::Spring),
            Quarter::Spring => None,
        }
    }

    /// 是否严格早于另一学季
    pub fn is_before(&self, other: Quarter) -> bool {
        *self < other
    }

    /// 转换为字符串标识
    pub fn as_str(&self) -> &'static str {
        match self {
            Quarter::Fall => "FALL",
            Quarter::Winter => "WINTER",
            Quarter::Spring => "SPRING",
        }
    }

    /// 从字符串解析学季
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "FALL" => Some(Quarter::Fall),
            "WINTER" => Some(Quarter::Winter),
            "SPRING" => Some(Quarter::Spring),
            _ => None,
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 课程类别 (Category)
// ==========================================
// 用途: 输出给展示层着色/分组, 引擎本身不依赖类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Engineering,                // 工程类
    MathAndScience,             // 数理类
    HumanitiesAndSocialScience, // 人文社科类
    Other,                      // 其他
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Engineering => write!(f, "ENGINEERING"),
            Category::MathAndScience => write!(f, "MATH_AND_SCIENCE"),
            Category::HumanitiesAndSocialScience => write!(f, "HUMANITIES_AND_SOCIAL_SCIENCE"),
            Category::Other => write!(f, "OTHER"),
        }
    }
}

// ==========================================
// 学分状态 (Credit Status)
// ==========================================
// 不变式: NotEarned 时 quarter_taken 必须为空
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CreditStatus {
    NotEarned, // 未获学分
    Earned,    // 已获学分 (修读中或外部折抵)
}

impl CreditStatus {
    /// 是否已获学分
    pub fn is_earned(&self) -> bool {
        matches!(self, CreditStatus::Earned)
    }
}

impl fmt::Display for CreditStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreditStatus::NotEarned => write!(f, "NOT_EARNED"),
            CreditStatus::Earned => write!(f, "EARNED"),
        }
    }
}

// ==========================================
// 课表槽位类型 (Slot Kind)
// ==========================================
// 显式类型标记, 取代对键名做 "CORE" 子串匹配
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotKind {
    Course, // 真实课程
    Filler, // 填充课程 (通识 CORE 占位)
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKind::Course => write!(f, "COURSE"),
            SlotKind::Filler => write!(f, "FILLER"),
        }
    }
}
