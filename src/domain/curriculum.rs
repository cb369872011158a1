// ==========================================
// 新生学年排课推导系统 - 培养方案数据装载
// ==========================================
// 职责: 课程目录 + 专业基准计划模板 + 折抵规则表的统一装载与校验
// 红线: 装载边界是唯一允许解析字符串键的地方, 校验通过后全部类型化
// ==========================================

use crate::domain::catalogue::Catalogue;
use crate::domain::course::CourseRecord;
use crate::domain::credit::CreditTables;
use crate::domain::schedule::{Schedule, ScheduleSlot, SlotKey};
use crate::domain::types::{Quarter, SlotKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;

// 默认填充支线名称
fn default_filler_branch() -> String {
    "core_courses".to_string()
}

// ==========================================
// CurriculumError - 培养方案数据错误
// ==========================================
#[derive(Error, Debug)]
pub enum CurriculumError {
    #[error("培养方案数据解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("课程开课学季为空: {course}")]
    EmptyOffering { course: String },

    #[error("课程学分数为零: {course}")]
    ZeroUnits { course: String },

    #[error("基准计划引用了目录外课程: major={major}, key={key}")]
    UnknownPlanCourse { major: String, key: String },

    #[error("填充支线不存在或为空: {branch}")]
    MissingFillerBranch { branch: String },

    #[error("折抵规则引用了目录外课程: table={table}, id={id}, reference={reference}")]
    UnknownCreditCourse {
        table: String,
        id: String,
        reference: String,
    },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// BasePlanTemplate - 基准计划模板
// ==========================================
// 学季 -> 槽位键列表; 课程键在装载时对目录解析,
// 填充键 (CORE<n>) 以填充支线首条记录为快照来源
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasePlanTemplate {
    pub quarters: BTreeMap<Quarter, Vec<SlotKey>>,
}

// ==========================================
// CurriculumData - 培养方案数据
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurriculumData {
    pub catalogue: Catalogue,                            // 课程目录模板
    pub base_plans: BTreeMap<String, BasePlanTemplate>,  // 专业标识 -> 基准计划模板
    #[serde(default)]
    pub credit_tables: CreditTables,                     // AP/转学分折抵规则
    #[serde(default = "default_filler_branch")]
    pub filler_branch: String,                           // 填充支线名称
}

impl CurriculumData {
    /// 从 JSON 文本装载并校验
    pub fn from_json_str(raw: &str) -> Result<Self, CurriculumError> {
        let data: CurriculumData = serde_json::from_str(raw)?;
        data.validate()?;
        Ok(data)
    }

    /// 填充课程模板记录 (填充支线首条)
    pub fn filler_record(&self) -> Option<&CourseRecord> {
        self.catalogue.find_course(&self.filler_branch, 0)
    }

    /// 校验目录/基准计划/折抵规则的内部一致性
    pub fn validate(&self) -> Result<(), CurriculumError> {
        // 1. 课程记录不变式
        for courses in self.catalogue.branches.values() {
            for course in courses {
                if course.offering.is_empty() {
                    return Err(CurriculumError::EmptyOffering {
                        course: course.code.to_string(),
                    });
                }
                if course.units == 0 {
                    return Err(CurriculumError::ZeroUnits {
                        course: course.code.to_string(),
                    });
                }
            }
        }

        // 2. 填充支线必须存在且非空
        if self.filler_record().is_none() {
            return Err(CurriculumError::MissingFillerBranch {
                branch: self.filler_branch.clone(),
            });
        }

        // 3. 基准计划中的课程键必须能在目录中定位
        for (major, template) in &self.base_plans {
            for keys in template.quarters.values() {
                for key in keys {
                    if let SlotKey::Course(code) = key {
                        if self.catalogue.find_course_location(code).is_none() {
                            return Err(CurriculumError::UnknownPlanCourse {
                                major: major.clone(),
                                key: key.to_string(),
                            });
                        }
                    }
                }
            }
        }

        // 4. 折抵规则引用必须能在目录中解析
        for (id, rule) in &self.credit_tables.ap_tests {
            for band in &rule.fulfillments {
                for reference in &band.fulfillment {
                    if self.catalogue.resolve_ref(reference).is_none() {
                        return Err(CurriculumError::UnknownCreditCourse {
                            table: "ap_tests".to_string(),
                            id: id.clone(),
                            reference: reference.to_string(),
                        });
                    }
                }
            }
        }
        for (id, rule) in &self.credit_tables.transfer_credits {
            for reference in &rule.fulfillment {
                if self.catalogue.resolve_ref(reference).is_none() {
                    return Err(CurriculumError::UnknownCreditCourse {
                        table: "transfer_credits".to_string(),
                        id: id.clone(),
                        reference: reference.to_string(),
                    });
                }
            }
        }

        Ok(())
    }

    /// 将基准计划模板解析为课表
    ///
    /// 校验已保证课程键可定位; 防御性地跳过仍不可定位的键并告警
    pub fn resolve_template(&self, template: &BasePlanTemplate) -> Schedule {
        let mut schedule = Schedule::new();

        for (quarter, keys) in &template.quarters {
            for key in keys {
                match key {
                    SlotKey::Course(code) => {
                        let Some((branch, id)) = self.catalogue.find_course_location(code) else {
                            warn!(key = %key, quarter = %quarter, "基准计划课程无法定位, 已跳过");
                            continue;
                        };
                        let Some(record) = self.catalogue.find_course(&branch, id) else {
                            continue;
                        };
                        schedule.insert(
                            *quarter,
                            key.clone(),
                            ScheduleSlot::snapshot(record, &branch, SlotKind::Course),
                        );
                    }
                    SlotKey::Filler(_) => {
                        let Some(record) = self.filler_record() else {
                            warn!(key = %key, quarter = %quarter, "填充支线缺失, 已跳过填充槽位");
                            continue;
                        };
                        schedule.insert(
                            *quarter,
                            key.clone(),
                            ScheduleSlot::snapshot(record, &self.filler_branch, SlotKind::Filler),
                        );
                    }
                }
            }
        }

        schedule
    }
}
