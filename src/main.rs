// ==========================================
// 新生学年排课推导系统 - 命令行入口
// ==========================================
// 用途: 装载培养方案数据与学分事件, 执行一轮重算并输出课表 JSON
// 用法: degree-plan-engine <curriculum.json> [major] [events.json]
// ==========================================

use anyhow::{bail, Context};
use degree_plan_engine::{CreditEvent, CurriculumData, RecomputeConfig, RecomputeSession};
use std::fs;

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    degree_plan_engine::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", degree_plan_engine::APP_NAME);
    tracing::info!("系统版本: {}", degree_plan_engine::VERSION);
    tracing::info!("==================================================");

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        bail!("用法: {} <curriculum.json> [major] [events.json]", args[0]);
    }

    // 装载培养方案数据
    let curriculum_path = &args[1];
    let raw = fs::read_to_string(curriculum_path)
        .with_context(|| format!("无法读取培养方案数据: {}", curriculum_path))?;
    let data = CurriculumData::from_json_str(&raw).context("培养方案数据不合法")?;
    tracing::info!(
        branches = data.catalogue.branches.len(),
        majors = data.base_plans.len(),
        "培养方案数据装载完成"
    );

    // 建立重算会话
    let major = args.get(2).map(String::as_str).unwrap_or("cse");
    let mut session = RecomputeSession::new(data, RecomputeConfig::default(), major)
        .with_context(|| format!("无法建立专业 {} 的重算会话", major))?;

    // 登记学分事件 (可选)
    if let Some(events_path) = args.get(3) {
        let raw = fs::read_to_string(events_path)
            .with_context(|| format!("无法读取学分事件: {}", events_path))?;
        let events: Vec<CreditEvent> =
            serde_json::from_str(&raw).context("学分事件数据不合法")?;
        tracing::info!(events = events.len(), "登记学分事件");
        for event in &events {
            session.apply_event(event);
        }
    }

    // 执行重算并输出结果
    let result = session.compute_new_schedule();
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
