// ==========================================
// 新生学年排课推导系统 - 课程领域模型
// ==========================================
// 职责: 课程标识/课程记录/先修引用
// 红线: 课程标识为 (department, number) 类型化二元组,
//       禁止在领域层内对拼接字符串做数字扫描
// ==========================================

use crate::domain::types::{Category, CreditStatus, Quarter};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// CourseCode - 课程代码
// ==========================================
// 展示形式: "<department><number>" (如 "COEN10")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CourseCode {
    pub department: String,    // 院系代码 (如 "COEN")
    pub course_number: String, // 课程编号 (如 "10", "11A")
}

impl CourseCode {
    /// 构造课程代码
    pub fn new(department: &str, course_number: &str) -> Self {
        Self {
            department: department.to_string(),
            course_number: course_number.to_string(),
        }
    }

    /// 从展示字符串解析 (仅用于数据装载边界)
    ///
    /// 规则: 首个 ASCII 数字之前为院系代码, 其余为课程编号。
    /// 无数字或以数字开头视为不合法, 返回 None。
    pub fn parse(title: &str) -> Option<Self> {
        let split = title.find(|c: char| c.is_ascii_digit())?;
        if split == 0 {
            return None;
        }
        Some(Self::new(&title[..split], &title[split..]))
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.department, self.course_number)
    }
}

// ==========================================
// CourseRef - 先修课引用
// ==========================================
// 三元组 (branch, department, number), 在目录中解析
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRef {
    pub branch: String, // 所属支线名称 (如 "math_courses")
    #[serde(flatten)]
    pub code: CourseCode,
}

impl CourseRef {
    /// 构造先修课引用
    pub fn new(branch: &str, department: &str, course_number: &str) -> Self {
        Self {
            branch: branch.to_string(),
            code: CourseCode::new(department, course_number),
        }
    }
}

impl fmt::Display for CourseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.branch, self.code)
    }
}

// ==========================================
// CourseRecord - 课程记录
// ==========================================
// 目录模板与学生台账共用同一结构;
// 台账上 credit/quarter_taken 为活跃状态, 模板上为基准计划标记
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseRecord {
    #[serde(flatten)]
    pub code: CourseCode,                // 课程代码
    pub name: String,                    // 课程名称
    #[serde(default)]
    pub description: String,             // 课程简介
    pub category: Category,              // 课程类别
    pub units: u32,                      // 学分数 (正整数)
    pub offering: Vec<Quarter>,          // 开课学季 (非空)
    #[serde(default)]
    pub prerequisites: Vec<CourseRef>,   // 先修课 (有序)
    #[serde(default = "CourseRecord::default_credit")]
    pub credit: CreditStatus,            // 学分状态
    #[serde(default)]
    pub quarter_taken: Option<Quarter>,  // 修读学季 (空 = 未排入或外部折抵)
}

impl CourseRecord {
    fn default_credit() -> CreditStatus {
        CreditStatus::NotEarned
    }

    /// 授予学分并记录修读学季
    ///
    /// quarter 为 None 表示学分由外部折抵, 不占用课表
    pub fn grant_credit(&mut self, quarter: Option<Quarter>) {
        self.credit = CreditStatus::Earned;
        self.quarter_taken = quarter;
    }

    /// 清除学分与修读学季
    pub fn clear_credit(&mut self) {
        self.credit = CreditStatus::NotEarned;
        self.quarter_taken = None;
    }

    /// 先修课中第一个与本课程同支线的引用
    ///
    /// 用于支线后继搜索的跳跃规则 (从先修课之后继续扫描)
    pub fn prerequisite_in_branch(&self, branch: &str) -> Option<&CourseRef> {
        self.prerequisites.iter().find(|p| p.branch == branch)
    }
}
