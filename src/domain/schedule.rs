// ==========================================
// 新生学年排课推导系统 - 课表领域模型
// ==========================================
// 职责: 槽位键/槽位快照/学季课表
// 红线: 同一课程代码同一时刻至多占用一个学季
// 不变式: 课表内每个课程槽位, 台账上对应记录必为
//         credit=EARNED 且 quarter_taken=该学季
// ==========================================

use crate::domain::course::{CourseCode, CourseRecord, CourseRef};
use crate::domain::types::{Category, Quarter, SlotKind};
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// 填充槽位键前缀 (展示形式 "CORE<n>")
const FILLER_KEY_PREFIX: &str = "CORE";

// ==========================================
// SlotKey - 课表槽位键
// ==========================================
// 封闭枚举取代字符串键: 真实课程按课程代码占位,
// 填充槽位按序号占位, 不再对键名做子串匹配
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SlotKey {
    Course(CourseCode), // 真实课程槽位
    Filler(u32),        // 填充槽位 CORE<n>
}

impl SlotKey {
    /// 是否为填充槽位
    pub fn is_filler(&self) -> bool {
        matches!(self, SlotKey::Filler(_))
    }

    /// 从展示字符串解析 (仅用于数据装载边界)
    pub fn parse(key: &str) -> Option<Self> {
        if let Some(rest) = key.strip_prefix(FILLER_KEY_PREFIX) {
            if let Ok(n) = rest.parse::<u32>() {
                return Some(SlotKey::Filler(n));
            }
        }
        CourseCode::parse(key).map(SlotKey::Course)
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotKey::Course(code) => write!(f, "{}", code),
            SlotKey::Filler(n) => write!(f, "{}{}", FILLER_KEY_PREFIX, n),
        }
    }
}

// 槽位键序列化为展示字符串, 使课表输出保持 "学季 -> {键 -> 槽位}" 的对象形态
impl Serialize for SlotKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SlotKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        SlotKey::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid slot key: {}", raw)))
    }
}

// ==========================================
// ScheduleSlot - 课表槽位快照
// ==========================================
// 红线: 只是课程记录的快照, 展示层渲染无需回查目录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub kind: SlotKind,                // 槽位类型 (课程/填充)
    #[serde(flatten)]
    pub code: CourseCode,              // 课程代码
    pub name: String,                  // 课程名称
    #[serde(default)]
    pub description: String,           // 课程简介
    pub branch: String,                // 所属支线
    pub offering: Vec<Quarter>,        // 开课学季
    pub category: Category,            // 课程类别
    pub units: u32,                    // 学分数
    #[serde(default)]
    pub prerequisites: Vec<CourseRef>, // 先修课
}

impl ScheduleSlot {
    /// 从课程记录生成快照
    pub fn snapshot(record: &CourseRecord, branch: &str, kind: SlotKind) -> Self {
        Self {
            kind,
            code: record.code.clone(),
            name: record.name.clone(),
            description: record.description.clone(),
            branch: branch.to_string(),
            offering: record.offering.clone(),
            category: record.category,
            units: record.units,
            prerequisites: record.prerequisites.clone(),
        }
    }
}

// ==========================================
// Schedule - 学季课表 (WorkingSchedule / BasePlan)
// ==========================================
// BTreeMap 保证确定性迭代顺序, 同一输入重算输出逐字节一致
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    pub quarters: BTreeMap<Quarter, BTreeMap<SlotKey, ScheduleSlot>>,
}

impl Schedule {
    /// 创建空课表 (三个学季全部就位)
    pub fn new() -> Self {
        let mut quarters = BTreeMap::new();
        for quarter in Quarter::ALL {
            quarters.insert(quarter, BTreeMap::new());
        }
        Self { quarters }
    }

    /// 指定学季的槽位表
    pub fn slots(&self, quarter: Quarter) -> Option<&BTreeMap<SlotKey, ScheduleSlot>> {
        self.quarters.get(&quarter)
    }

    /// 插入槽位
    pub fn insert(&mut self, quarter: Quarter, key: SlotKey, slot: ScheduleSlot) {
        self.quarters.entry(quarter).or_default().insert(key, slot);
    }

    /// 移除槽位
    pub fn remove(&mut self, quarter: Quarter, key: &SlotKey) -> Option<ScheduleSlot> {
        self.quarters.get_mut(&quarter)?.remove(key)
    }

    /// 查找槽位
    pub fn get(&self, quarter: Quarter, key: &SlotKey) -> Option<&ScheduleSlot> {
        self.quarters.get(&quarter)?.get(key)
    }

    /// 课程代码当前占用的学季 (未排入返回 None)
    pub fn quarter_of(&self, code: &CourseCode) -> Option<Quarter> {
        let key = SlotKey::Course(code.clone());
        for (quarter, slots) in &self.quarters {
            if slots.contains_key(&key) {
                return Some(*quarter);
            }
        }
        None
    }

    /// 学季总学分 (可排除一门课程, 用于排除工程入门课的学分统计)
    pub fn total_units_excluding(&self, quarter: Quarter, exclude: Option<&CourseCode>) -> u32 {
        let Some(slots) = self.quarters.get(&quarter) else {
            return 0;
        };
        slots
            .iter()
            .filter(|(key, _)| match (key, exclude) {
                (SlotKey::Course(code), Some(excluded)) => code != excluded,
                _ => true,
            })
            .map(|(_, slot)| slot.units)
            .sum()
    }

    /// 学季内填充槽位数量
    pub fn filler_count(&self, quarter: Quarter) -> usize {
        self.quarters
            .get(&quarter)
            .map(|slots| slots.keys().filter(|k| k.is_filler()).count())
            .unwrap_or(0)
    }

    /// 学季内第一个填充槽位键
    pub fn first_filler_key(&self, quarter: Quarter) -> Option<SlotKey> {
        self.quarters
            .get(&quarter)?
            .keys()
            .find(|k| k.is_filler())
            .cloned()
    }

    /// 学季内下一个未占用的填充槽位键 (CORE0 起递增)
    pub fn next_filler_key(&self, quarter: Quarter) -> SlotKey {
        let slots = self.quarters.get(&quarter);
        for n in 0.. {
            let key = SlotKey::Filler(n);
            match slots {
                Some(map) if map.contains_key(&key) => continue,
                _ => return key,
            }
        }
        unreachable!()
    }

    /// 全部槽位数量
    pub fn slot_count(&self) -> usize {
        self.quarters.values().map(|slots| slots.len()).sum()
    }

    /// 全部填充槽位数量
    pub fn total_filler_count(&self) -> usize {
        Quarter::ALL
            .iter()
            .map(|q| self.filler_count(*q))
            .sum()
    }
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new()
    }
}
