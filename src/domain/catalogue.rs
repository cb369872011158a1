// ==========================================
// 新生学年排课推导系统 - 课程目录
// ==========================================
// 职责: 支线化课程目录与查找操作
// 红线: 目录模板装载后不可变; 每轮重算前整体克隆为学生台账
// 说明: 查找未命中 (NotFound) 是正常受检结果, 驱动"从未修读"等分支,
//       不作为错误向上传播
// ==========================================

use crate::domain::course::{CourseCode, CourseRecord, CourseRef};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Catalogue - 课程目录 / 学生台账
// ==========================================
// 同一结构承担两种角色:
// - 模板: 装载后只读, 仅在切换专业时重建基准标记
// - 台账: 每轮重算从模板克隆, 由引擎就地更新 credit/quarter_taken
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalogue {
    // 支线名称 -> 顺序课程序列 (顺序即默认修读顺序)
    pub branches: BTreeMap<String, Vec<CourseRecord>>,
}

impl Catalogue {
    /// 创建空目录
    pub fn new() -> Self {
        Self::default()
    }

    /// 按支线与位置查找课程
    pub fn find_course(&self, branch: &str, id: usize) -> Option<&CourseRecord> {
        self.branches.get(branch).and_then(|b| b.get(id))
    }

    /// 按支线与位置查找课程 (可变)
    pub fn find_course_mut(&mut self, branch: &str, id: usize) -> Option<&mut CourseRecord> {
        self.branches.get_mut(branch).and_then(|b| b.get_mut(id))
    }

    /// 在指定支线内查找课程代码对应的位置
    pub fn find_course_id(&self, branch: &str, code: &CourseCode) -> Option<usize> {
        self.branches
            .get(branch)?
            .iter()
            .position(|c| c.code == *code)
    }

    /// 扫描全部支线, 定位课程代码所在的 (支线, 位置)
    pub fn find_course_location(&self, code: &CourseCode) -> Option<(String, usize)> {
        for (branch, courses) in &self.branches {
            if let Some(id) = courses.iter().position(|c| c.code == *code) {
                return Some((branch.clone(), id));
            }
        }
        None
    }

    /// 解析先修课引用
    pub fn resolve_ref(&self, reference: &CourseRef) -> Option<&CourseRecord> {
        let id = self.find_course_id(&reference.branch, &reference.code)?;
        self.find_course(&reference.branch, id)
    }

    /// 支线长度 (支线不存在时为 0)
    pub fn branch_len(&self, branch: &str) -> usize {
        self.branches.get(branch).map(|b| b.len()).unwrap_or(0)
    }

    /// 清除全部学分标记 (切换专业时的第一步)
    pub fn reset_credit(&mut self) {
        for courses in self.branches.values_mut() {
            for course in courses.iter_mut() {
                course.clear_credit();
            }
        }
    }
}
