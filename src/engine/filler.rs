// ==========================================
// 新生学年排课推导系统 - 填充槽位引擎
// ==========================================
// 职责: 支线穷尽或结构调整时, 以通识填充课程补位
// 红线: 填充槽位键取学季内首个未占用的 CORE<n>, 从 0 递增
// ==========================================

use crate::domain::catalogue::Catalogue;
use crate::domain::schedule::{Schedule, ScheduleSlot, SlotKey};
use crate::domain::types::{Quarter, SlotKind};
use tracing::{debug, warn};

// ==========================================
// CoreFiller - 填充槽位引擎
// ==========================================
pub struct CoreFiller {
    filler_branch: String, // 填充支线名称 (快照来源: 支线首条记录)
}

impl CoreFiller {
    /// 创建新的填充槽位引擎
    pub fn new(filler_branch: &str) -> Self {
        Self {
            filler_branch: filler_branch.to_string(),
        }
    }

    /// 填充课程模板快照
    pub fn filler_slot(&self, ledger: &Catalogue) -> Option<ScheduleSlot> {
        let record = ledger.find_course(&self.filler_branch, 0)?;
        Some(ScheduleSlot::snapshot(record, &self.filler_branch, SlotKind::Filler))
    }

    /// 在指定学季插入一个填充槽位
    ///
    /// # 返回
    /// 插入的槽位键; 填充支线缺失时返回 None (告警, 不中断)
    pub fn insert_filler(
        &self,
        working: &mut Schedule,
        ledger: &Catalogue,
        quarter: Quarter,
    ) -> Option<SlotKey> {
        let Some(slot) = self.filler_slot(ledger) else {
            warn!(branch = %self.filler_branch, "填充支线缺失, 无法补位");
            return None;
        };

        let key = working.next_filler_key(quarter);
        debug!(quarter = %quarter, key = %key, "插入填充槽位");
        working.insert(quarter, key.clone(), slot);
        Some(key)
    }
}
