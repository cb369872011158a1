// ==========================================
// 新生学年排课推导系统 - 引擎配置
// ==========================================
// 职责: 结构修正与事件翻译的规则常量
// 说明: 默认值对应 CSE/WDE 培养方案; 可经 serde 从配置装载覆盖
// ==========================================

use crate::domain::course::CourseCode;
use serde::{Deserialize, Serialize};

// ==========================================
// StructureRules - 结构修正规则
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureRules {
    /// 单学季学分上限 (不含工程入门课)
    pub unit_cap: u32,
    /// 工程入门课配载阈值 (= 上限 - 入门课学分)
    pub balance_threshold: u32,
    /// 工程入门课 (秋/冬双学季开课, 单独配载)
    pub intro_course: CourseCode,
    /// 顶点先导课 (不得早于其先修对完成的学年内顺序)
    pub capstone_course: CourseCode,
    /// 顶点先导课的两门可替代先修课
    pub capstone_prereqs: [CourseCode; 2],
    /// 成对通识选修 (按顺序占用两个连续学季)
    pub paired_electives: [CourseCode; 2],
}

impl Default for StructureRules {
    fn default() -> Self {
        Self {
            unit_cap: 19,
            balance_threshold: 17,
            intro_course: CourseCode::new("ENGR", "1"),
            capstone_course: CourseCode::new("COEN", "12"),
            capstone_prereqs: [CourseCode::new("COEN", "10"), CourseCode::new("COEN", "11")],
            paired_electives: [CourseCode::new("C&I", "1"), CourseCode::new("C&I", "2")],
        }
    }
}

// ==========================================
// TranslatorRules - 事件翻译规则
// ==========================================
// 固定标识事件 (入学测试/编程经历) 的折抵课程;
// AP/转学分折抵由培养方案数据中的规则表驱动
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatorRules {
    /// 微积分入学测试通过折抵的课程
    pub readiness_exam_fulfillment: Vec<CourseCode>,
    /// 编程经历折抵的课程
    pub programming_experience_fulfillment: Vec<CourseCode>,
}

impl Default for TranslatorRules {
    fn default() -> Self {
        Self {
            readiness_exam_fulfillment: vec![CourseCode::new("MATH", "9")],
            programming_experience_fulfillment: vec![CourseCode::new("COEN", "10")],
        }
    }
}

// ==========================================
// RecomputeConfig - 重算配置
// ==========================================
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecomputeConfig {
    #[serde(default)]
    pub structure: StructureRules,
    #[serde(default)]
    pub translator: TranslatorRules,
}
