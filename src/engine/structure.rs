// ==========================================
// 新生学年排课推导系统 - 结构修正引擎
// ==========================================
// 职责: 替补链终止后的课表结构修正
//   1) 顶点先导课顺序修正 (冬季 -> 春季)
//   2) 工程入门课配载均衡 (秋/冬取学分较少者)
//   3) 学分上限约束 (逐学季移除填充槽位)
//   4) 成对通识选修插入 (每轮重算一次, 由驱动器调用)
// 红线: 修正均为尽力而为, 不满足约束时输出诊断, 不中断重算
// ==========================================

use crate::config::StructureRules;
use crate::domain::catalogue::Catalogue;
use crate::domain::course::CourseCode;
use crate::domain::schedule::{Schedule, ScheduleSlot, SlotKey};
use crate::domain::types::{Quarter, SlotKind};
use crate::engine::filler::CoreFiller;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

// ==========================================
// Diagnostic - 结构诊断
// ==========================================
// 非致命约束违规, 附着在重算结果上, 课表仍按尽力状态返回
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Diagnostic {
    /// 移除全部填充槽位后学分仍超上限
    UnitCapExceeded {
        quarter: Quarter,
        units: u32,
        cap: u32,
    },
    /// 两个候选学季均超配载阈值, 工程入门课整体放弃
    IntroCourseDropped { course: CourseCode },
    /// 无连续的含填充学季对, 成对通识选修本轮未插入
    PairedElectiveUnplaced {
        first: CourseCode,
        second: CourseCode,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnitCapExceeded { quarter, units, cap } => {
                write!(f, "UNIT_CAP_EXCEEDED: {} 学分 {} 超上限 {}", quarter, units, cap)
            }
            Diagnostic::IntroCourseDropped { course } => {
                write!(f, "INTRO_COURSE_DROPPED: {}", course)
            }
            Diagnostic::PairedElectiveUnplaced { first, second } => {
                write!(f, "PAIRED_ELECTIVE_UNPLACED: {}+{}", first, second)
            }
        }
    }
}

// ==========================================
// StructureCorrector - 结构修正引擎
// ==========================================
pub struct StructureCorrector {
    rules: StructureRules,
    filler: CoreFiller,
}

impl StructureCorrector {
    /// 创建新的结构修正引擎
    pub fn new(rules: StructureRules, filler_branch: &str) -> Self {
        Self {
            rules,
            filler: CoreFiller::new(filler_branch),
        }
    }

    // ==========================================
    // 链尾修正 (每条替补链终止时执行)
    // ==========================================

    /// 按固定顺序执行顺序修正/配载均衡/学分上限
    pub fn run_terminal_pass(
        &self,
        working: &mut Schedule,
        ledger: &mut Catalogue,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        self.reorder_capstone(working, ledger);
        diagnostics.extend(self.balance_intro_load(working, ledger));
        diagnostics.extend(self.enforce_unit_cap(working));
        diagnostics
    }

    // ==========================================
    // 顶点先导课顺序修正
    // ==========================================

    /// 顶点先导课落在冬季且其先修对未在秋季完成时,
    /// 将其换到春季 (春季填充槽位腾位), 冬季回填填充槽位
    pub fn reorder_capstone(&self, working: &mut Schedule, ledger: &mut Catalogue) {
        let capstone = &self.rules.capstone_course;
        let key = SlotKey::Course(capstone.clone());

        // 不在冬季: 缺席或已处于要求顺序
        if working.get(Quarter::Winter, &key).is_none() {
            return;
        }

        // 先修对任一门已在秋季: 顺序正确
        let [first, second] = &self.rules.capstone_prereqs;
        let fall_has_prereq = working
            .get(Quarter::Fall, &SlotKey::Course(first.clone()))
            .is_some()
            || working
                .get(Quarter::Fall, &SlotKey::Course(second.clone()))
                .is_some();
        if fall_has_prereq {
            return;
        }

        info!(capstone = %capstone, "顶点先导课落在冬季且先修对同学季, 调整到春季");

        // 春季如有填充槽位先腾位
        if let Some(spring_core) = working.first_filler_key(Quarter::Spring) {
            working.remove(Quarter::Spring, &spring_core);
        }

        // 冬季 -> 春季
        if let Some(slot) = working.remove(Quarter::Winter, &key) {
            working.insert(Quarter::Spring, key, slot);
        }

        // 台账同步修读学季
        if let Some((branch, id)) = ledger.find_course_location(capstone) {
            if let Some(record) = ledger.find_course_mut(&branch, id) {
                record.quarter_taken = Some(Quarter::Spring);
            }
        }

        // 冬季回填
        self.filler.insert_filler(working, ledger, Quarter::Winter);
    }

    // ==========================================
    // 工程入门课配载均衡
    // ==========================================

    /// 工程入门课放入秋/冬两学季中学分较少者;
    /// 两学季均超阈值时整体放弃 (清除学分, 输出诊断)
    pub fn balance_intro_load(
        &self,
        working: &mut Schedule,
        ledger: &mut Catalogue,
    ) -> Vec<Diagnostic> {
        let intro = &self.rules.intro_course;
        let key = SlotKey::Course(intro.clone());
        let current = working.quarter_of(intro);
        let location = ledger.find_course_location(intro);

        // 外部折抵且未排入: 不参与配载 (撤课单调性)
        if current.is_none() {
            if let Some((branch, id)) = &location {
                if let Some(record) = ledger.find_course(branch, *id) {
                    if record.credit.is_earned() && record.quarter_taken.is_none() {
                        return Vec::new();
                    }
                }
            }
        }

        let threshold = self.rules.balance_threshold;
        let fall_units = working.total_units_excluding(Quarter::Fall, Some(intro));
        let winter_units = working.total_units_excluding(Quarter::Winter, Some(intro));
        debug!(
            intro = %intro,
            fall_units,
            winter_units,
            threshold,
            "工程入门课配载检查"
        );

        // 两学季均超阈值: 放弃入门课
        if fall_units > threshold && winter_units > threshold {
            warn!(intro = %intro, "秋冬学季均超配载阈值, 放弃工程入门课");
            if let Some(quarter) = current {
                working.remove(quarter, &key);
            }
            if let Some((branch, id)) = &location {
                if let Some(record) = ledger.find_course_mut(branch, *id) {
                    record.clear_credit();
                }
            }
            return vec![Diagnostic::IntroCourseDropped {
                course: intro.clone(),
            }];
        }

        // 较轻学季为目标
        let target = if fall_units <= winter_units {
            Quarter::Fall
        } else {
            Quarter::Winter
        };
        if current == Some(target) {
            return Vec::new();
        }

        if let Some(quarter) = current {
            working.remove(quarter, &key);
        }
        match &location {
            Some((branch, id)) => {
                if let Some(record) = ledger.find_course_mut(branch, *id) {
                    record.grant_credit(Some(target));
                    let snapshot = ScheduleSlot::snapshot(record, branch, SlotKind::Course);
                    working.insert(target, key, snapshot);
                }
            }
            None => {
                warn!(intro = %intro, "工程入门课不在目录中, 跳过配载");
            }
        }

        Vec::new()
    }

    // ==========================================
    // 学分上限约束
    // ==========================================

    /// 逐学季检查学分 (不含工程入门课), 超上限时移除填充槽位;
    /// 填充槽位耗尽仍超限输出诊断
    pub fn enforce_unit_cap(&self, working: &mut Schedule) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        let cap = self.rules.unit_cap;

        for quarter in Quarter::ALL {
            loop {
                let units = working.total_units_excluding(quarter, Some(&self.rules.intro_course));
                if units <= cap {
                    break;
                }
                let Some(core) = working.first_filler_key(quarter) else {
                    warn!(quarter = %quarter, units, cap, "填充槽位耗尽, 学分仍超上限");
                    diagnostics.push(Diagnostic::UnitCapExceeded { quarter, units, cap });
                    break;
                };
                debug!(quarter = %quarter, key = %core, "超上限, 移除填充槽位");
                working.remove(quarter, &core);
            }
        }

        diagnostics
    }

    // ==========================================
    // 成对通识选修插入 (每轮重算一次)
    // ==========================================

    /// 成对选修未获学分时, 插入到两个连续且都含填充槽位的学季
    /// (秋+冬优先, 其次冬+春), 每学季以一半替换一个填充槽位;
    /// 无可用学季对时输出诊断, 留待下轮重算
    pub fn insert_paired_electives(
        &self,
        working: &mut Schedule,
        ledger: &mut Catalogue,
    ) -> Vec<Diagnostic> {
        let [first, second] = self.rules.paired_electives.clone();

        // 第一门已获学分 (基准计划排入或外部折抵): 无需插入
        let Some((first_branch, first_id)) = ledger.find_course_location(&first) else {
            return Vec::new();
        };
        if ledger
            .find_course(&first_branch, first_id)
            .map(|r| r.credit.is_earned())
            .unwrap_or(true)
        {
            return Vec::new();
        }

        for (earlier, later) in [(Quarter::Fall, Quarter::Winter), (Quarter::Winter, Quarter::Spring)] {
            if working.filler_count(earlier) == 0 || working.filler_count(later) == 0 {
                continue;
            }

            info!(first = %first, second = %second, earlier = %earlier, later = %later, "插入成对通识选修");

            for (quarter, code) in [(earlier, &first), (later, &second)] {
                let Some(core) = working.first_filler_key(quarter) else {
                    continue;
                };
                working.remove(quarter, &core);

                let Some((branch, id)) = ledger.find_course_location(code) else {
                    warn!(course = %code, "成对选修不在目录中, 跳过");
                    continue;
                };
                if let Some(record) = ledger.find_course_mut(&branch, id) {
                    record.grant_credit(Some(quarter));
                    let snapshot = ScheduleSlot::snapshot(record, &branch, SlotKind::Course);
                    working.insert(quarter, SlotKey::Course(code.clone()), snapshot);
                }
            }
            return Vec::new();
        }

        vec![Diagnostic::PairedElectiveUnplaced { first, second }]
    }
}
