// ==========================================
// 新生学年排课推导系统 - 重算驱动器
// ==========================================
// 职责: 编排一轮完整重算: 重置 -> 按登记顺序重放修改日志 -> 结构收尾
// 红线: 每轮从基准计划整体重建, 不携带上一轮的增量变更;
//       同一 (基准计划, 修改日志) 重算任意多次输出逐字节一致
// 红线: 重算过程不允许失败; 约束不满足以诊断形式附着在结果上
// ==========================================

use crate::config::RecomputeConfig;
use crate::domain::catalogue::Catalogue;
use crate::domain::credit::CreditEvent;
use crate::domain::curriculum::CurriculumData;
use crate::domain::mod_log::{EventId, ModLog, Operation};
use crate::domain::schedule::{Schedule, SlotKey};
use crate::engine::structure::{Diagnostic, StructureCorrector};
use crate::engine::substitution::SubstitutionEngine;
use crate::engine::translator::CreditTranslator;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, instrument};
use uuid::Uuid;

// ==========================================
// RecomputeError - 重算会话错误
// ==========================================
// 仅在专业选择/会话建立边界出现; 重算本身不产生错误
#[derive(Error, Debug)]
pub enum RecomputeError {
    #[error("未知专业: {major}")]
    UnknownMajor { major: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// RecomputeResult - 重算结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecomputeResult {
    pub pass_id: Uuid,                  // 本轮重算标识
    pub major: String,                  // 专业标识
    pub computed_at: NaiveDateTime,     // 重算时间
    pub schedule: Schedule,             // 推导出的课表 (只读交付展示层)
    pub diagnostics: Vec<Diagnostic>,   // 非致命约束诊断
    pub total_slots: usize,             // 总槽位数
    pub filler_slots: usize,            // 填充槽位数
    pub active_events: usize,           // 生效事件数
    pub elapsed_ms: i64,                // 耗时(毫秒)
}

// ==========================================
// RecomputeSession - 重算会话
// ==========================================
// 独占持有 (WorkingSchedule, 台账) 这对可变状态;
// 单线程同步执行, 一轮重算完成前不接受其他输入
pub struct RecomputeSession {
    data: CurriculumData,       // 静态输入: 目录/基准计划模板/折抵规则表
    major: String,              // 当前专业
    base_plan: Schedule,        // 基准课表 (切换专业时重建)
    ledger_template: Catalogue, // 带基准标记的台账模板
    mod_log: ModLog,            // 修改日志
    working: Schedule,          // 工作课表 (每轮重建)
    ledger: Catalogue,          // 学生台账 (每轮重建)
    translator: CreditTranslator,
    substitution: SubstitutionEngine,
    structure: StructureCorrector,
}

impl RecomputeSession {
    /// 建立重算会话并选定专业
    pub fn new(
        data: CurriculumData,
        config: RecomputeConfig,
        major: &str,
    ) -> Result<Self, RecomputeError> {
        let translator = CreditTranslator::new(config.translator.clone());
        let substitution = SubstitutionEngine::new(&data.filler_branch);
        let structure = StructureCorrector::new(config.structure.clone(), &data.filler_branch);

        let mut session = Self {
            base_plan: Schedule::new(),
            ledger_template: data.catalogue.clone(),
            working: Schedule::new(),
            ledger: data.catalogue.clone(),
            mod_log: ModLog::new(),
            major: String::new(),
            data,
            translator,
            substitution,
            structure,
        };
        session.set_base_plan(major)?;
        Ok(session)
    }

    // ==========================================
    // 专业选择
    // ==========================================

    /// 切换专业: 清除目录学分标记, 按专业模板重建基准计划
    ///
    /// 修改日志保持不变, 已登记事件在新基准上重放
    pub fn set_base_plan(&mut self, major: &str) -> Result<(), RecomputeError> {
        let Some(template) = self.data.base_plans.get(major) else {
            return Err(RecomputeError::UnknownMajor {
                major: major.to_string(),
            });
        };

        let base_plan = self.data.resolve_template(template);

        // 台账模板: 克隆目录, 清除标记, 再按基准计划落位标记
        let mut ledger_template = self.data.catalogue.clone();
        ledger_template.reset_credit();
        for (quarter, slots) in &base_plan.quarters {
            for (key, slot) in slots {
                let SlotKey::Course(code) = key else {
                    continue; // 填充槽位不对应台账记录
                };
                let Some(id) = ledger_template.find_course_id(&slot.branch, code) else {
                    continue;
                };
                if let Some(record) = ledger_template.find_course_mut(&slot.branch, id) {
                    record.grant_credit(Some(*quarter));
                }
            }
        }

        info!(major = %major, slots = base_plan.slot_count(), "基准计划重建完成");
        self.major = major.to_string();
        self.base_plan = base_plan;
        self.ledger_template = ledger_template;
        Ok(())
    }

    // ==========================================
    // 学分事件登记/撤销
    // ==========================================

    /// 登记学分事件 (翻译为操作并写入修改日志)
    pub fn apply_event(&mut self, event: &CreditEvent) {
        let operations = self.translator.translate(event, &self.data.credit_tables);
        let event_id = event.event_id();
        info!(event = %event_id, operations = operations.len(), "登记学分事件");
        self.mod_log.record(event_id, operations);
    }

    /// 撤销学分事件 (连同其全部操作)
    pub fn retract_event(&mut self, event_id: &EventId) -> bool {
        let removed = self.mod_log.retract(event_id);
        info!(event = %event_id, removed, "撤销学分事件");
        removed
    }

    // ==========================================
    // 重算入口
    // ==========================================

    /// 执行一轮完整重算
    ///
    /// # 流程
    /// 1. 重置: 基准计划 -> 工作课表, 台账模板 -> 学生台账
    /// 2. 重放: 按登记顺序执行修改日志中的全部操作
    /// 3. 收尾: 成对通识选修插入 (每轮一次)
    #[instrument(skip(self), fields(major = %self.major, events = self.mod_log.len()))]
    pub fn compute_new_schedule(&mut self) -> RecomputeResult {
        let started = Instant::now();
        let mut diagnostics = Vec::new();

        // 步骤1: 重置工作状态
        self.working = self.base_plan.clone();
        self.ledger = self.ledger_template.clone();

        // 步骤2: 重放修改日志
        for entry in self.mod_log.entries() {
            debug!(event = %entry.event_id, operations = entry.operations.len(), "重放事件");
            for operation in &entry.operations {
                match operation {
                    Operation::RemoveCourse { code } => {
                        diagnostics.extend(self.substitution.remove_course(
                            &mut self.working,
                            &mut self.ledger,
                            &self.structure,
                            code.clone(),
                        ));
                    }
                }
            }
        }

        // 步骤3: 成对通识选修插入
        diagnostics.extend(
            self.structure
                .insert_paired_electives(&mut self.working, &mut self.ledger),
        );

        let result = RecomputeResult {
            pass_id: Uuid::new_v4(),
            major: self.major.clone(),
            computed_at: chrono::Utc::now().naive_utc(),
            schedule: self.working.clone(),
            diagnostics,
            total_slots: self.working.slot_count(),
            filler_slots: self.working.total_filler_count(),
            active_events: self.mod_log.len(),
            elapsed_ms: started.elapsed().as_millis() as i64,
        };

        info!(
            pass_id = %result.pass_id,
            total_slots = result.total_slots,
            filler_slots = result.filler_slots,
            diagnostics = result.diagnostics.len(),
            elapsed_ms = result.elapsed_ms,
            "重算完成"
        );

        result
    }

    // ==========================================
    // 只读访问
    // ==========================================

    /// 当前专业标识
    pub fn major(&self) -> &str {
        &self.major
    }

    /// 基准课表
    pub fn base_plan(&self) -> &Schedule {
        &self.base_plan
    }

    /// 上一轮重算后的工作课表
    pub fn working_schedule(&self) -> &Schedule {
        &self.working
    }

    /// 上一轮重算后的学生台账
    pub fn ledger(&self) -> &Catalogue {
        &self.ledger
    }

    /// 修改日志
    pub fn mod_log(&self) -> &ModLog {
        &self.mod_log
    }
}
