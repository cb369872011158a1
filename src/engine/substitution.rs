// ==========================================
// 新生学年排课推导系统 - 课程替补引擎
// ==========================================
// 职责: 折抵并移除课程, 以支线后继课程递进补位
// 红线: 显式游标状态机 (Locate/At/Terminate), 不用带外哨兵值
// 终止性: 支线位置单调不减, 学季指针单调前进 (秋->冬->春->终止),
//         填充补位直接终止, 链长受支线长度约束
// ==========================================

use crate::domain::catalogue::Catalogue;
use crate::domain::course::CourseCode;
use crate::domain::schedule::{Schedule, ScheduleSlot, SlotKey};
use crate::domain::types::{CreditStatus, Quarter, SlotKind};
use crate::engine::eligibility::EligibilityCore;
use crate::engine::filler::CoreFiller;
use crate::engine::structure::{Diagnostic, StructureCorrector};
use tracing::{debug, info, instrument, warn};

// ==========================================
// Cursor - 替补链游标
// ==========================================
// Locate: 初始调用, 尚未定位课程所在学季
// At: 在指定学季处理当前课程
// Terminate: 链终止信号 (运行链尾修正后停止)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    Locate,
    At(Quarter),
    Terminate,
}

// ==========================================
// SubstitutionEngine - 课程替补引擎
// ==========================================
pub struct SubstitutionEngine {
    filler: CoreFiller,
}

impl SubstitutionEngine {
    /// 创建新的课程替补引擎
    pub fn new(filler_branch: &str) -> Self {
        Self {
            filler: CoreFiller::new(filler_branch),
        }
    }

    /// 折抵并移除一门课程, 驱动整条替补链直到终止
    ///
    /// # 规则
    /// - 课程在课表中: 从所在学季开始逐学季替补, 链终止时执行结构修正
    /// - 课程不在课表中: 追溯授予学分, 不触发替补与修正
    /// - 预期槽位缺失 (不一致状态): 视为已应用, 直接收尾
    ///
    /// # 返回
    /// 链尾结构修正产生的诊断
    #[instrument(skip(self, working, ledger, structure), fields(course = %code))]
    pub fn remove_course(
        &self,
        working: &mut Schedule,
        ledger: &mut Catalogue,
        structure: &StructureCorrector,
        code: CourseCode,
    ) -> Vec<Diagnostic> {
        let mut current = code;
        let mut cursor = Cursor::Locate;

        loop {
            match cursor {
                Cursor::Terminate => {
                    return structure.run_terminal_pass(working, ledger);
                }
                Cursor::Locate => match working.quarter_of(&current) {
                    Some(quarter) => {
                        cursor = Cursor::At(quarter);
                    }
                    None => {
                        self.grant_retroactive_credit(ledger, &current);
                        return Vec::new();
                    }
                },
                Cursor::At(quarter) => {
                    cursor = self.substitute_in_quarter(working, ledger, &mut current, quarter);
                }
            }
        }
    }

    // ==========================================
    // 单学季替补步骤
    // ==========================================

    /// 移除当前课程在指定学季的槽位, 前移支线后继课程,
    /// 返回链的下一游标 (后继课程的下一开课学季或终止)
    fn substitute_in_quarter(
        &self,
        working: &mut Schedule,
        ledger: &mut Catalogue,
        current: &mut CourseCode,
        quarter: Quarter,
    ) -> Cursor {
        let key = SlotKey::Course(current.clone());
        let Some(slot) = working.get(quarter, &key).cloned() else {
            warn!(course = %current, quarter = %quarter, "预期槽位缺失, 视为已应用");
            return Cursor::Terminate;
        };

        let branch = slot.branch;
        let Some(id) = ledger.find_course_id(&branch, current) else {
            warn!(course = %current, branch = %branch, "台账定位失败, 链终止");
            return Cursor::Terminate;
        };

        debug!(course = %current, quarter = %quarter, "移除课表槽位");
        working.remove(quarter, &key);

        // 台账先行更新再搜索后继: 同一代码仍在课表他处 (别名重复的
        // 防御场景) 则记其学季, 否则置空。置空后被移除课程呈现
        // "已获学分无学季", 其依赖课程通过先修判定得以前移进空位,
        // 课程自身则被"已满足"谓词跳过, 不会选自己为后继
        let remaining = working.quarter_of(current);
        if let Some(record) = ledger.find_course_mut(&branch, id) {
            record.quarter_taken = remaining;
        }

        let successor = Self::next_eligible_after(ledger, &branch, id, quarter);

        match successor {
            None => {
                // 支线穷尽: 填充补位, 补位即满足本学季, 链终止
                info!(course = %current, quarter = %quarter, "支线穷尽, 填充补位");
                self.filler.insert_filler(working, ledger, quarter);
                Cursor::Terminate
            }
            Some(successor_id) => {
                let Some(record) = ledger.find_course_mut(&branch, successor_id) else {
                    return Cursor::Terminate;
                };
                // 后继前移进入空位: 授予学分, 修读学季为被腾出的学季
                record.grant_credit(Some(quarter));
                let successor_code = record.code.clone();
                let offering = record.offering.clone();
                let snapshot = ScheduleSlot::snapshot(record, &branch, SlotKind::Course);
                working.insert(quarter, SlotKey::Course(successor_code.clone()), snapshot);
                info!(
                    removed = %current,
                    successor = %successor_code,
                    quarter = %quarter,
                    "后继课程前移补位"
                );

                // 链递进: 后继课程原先的落位在其下一开课学季处理
                *current = successor_code;
                match EligibilityCore::next_offered_quarter(&offering, quarter) {
                    Some(next) => Cursor::At(next),
                    None => Cursor::Terminate,
                }
            }
        }
    }

    // ==========================================
    // 支线后继搜索
    // ==========================================

    /// 从指定位置之后搜索目标学季的下一门可排课程
    ///
    /// # 规则
    /// - 起点: 课程有同支线先修课时从该先修课位置之后继续 (跳跃规则),
    ///   否则从当前位置 + 1 继续
    /// - 向后扫描, 跳过 已满足 / 未开课 / 先修未完成 的课程
    /// - 到达支线末尾返回 None
    pub fn next_eligible_after(
        ledger: &Catalogue,
        branch: &str,
        id: usize,
        quarter: Quarter,
    ) -> Option<usize> {
        let courses = ledger.branches.get(branch)?;
        let current = courses.get(id)?;

        let start = match current
            .prerequisite_in_branch(branch)
            .and_then(|reference| ledger.find_course_id(branch, &reference.code))
        {
            Some(parent_id) => parent_id + 1,
            None => id + 1,
        };

        for candidate_id in start..courses.len() {
            let candidate = &courses[candidate_id];
            if EligibilityCore::already_satisfied_by(candidate, quarter) {
                continue;
            }
            if !EligibilityCore::offered_in(candidate, quarter) {
                continue;
            }
            if !EligibilityCore::prereqs_satisfied_by(candidate, quarter, ledger) {
                continue;
            }
            return Some(candidate_id);
        }
        None
    }

    // ==========================================
    // 追溯授予学分
    // ==========================================

    /// 课程从未排入课表时, 仅标记台账学分, 不扰动课表
    fn grant_retroactive_credit(&self, ledger: &mut Catalogue, code: &CourseCode) {
        let Some((branch, id)) = ledger.find_course_location(code) else {
            warn!(course = %code, "课程不在目录中, 忽略折抵操作");
            return;
        };
        if let Some(record) = ledger.find_course_mut(&branch, id) {
            record.credit = CreditStatus::Earned;
            info!(course = %code, "课程未排入课表, 追溯授予学分");
        }
    }
}
