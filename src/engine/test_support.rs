// ==========================================
// 新生学年排课推导系统 - 引擎测试数据
// ==========================================
// 职责: 单元测试共用的小型培养方案 (CSE/WDE)
// ==========================================

use crate::domain::catalogue::Catalogue;
use crate::domain::course::{CourseCode, CourseRecord, CourseRef};
use crate::domain::credit::{ApTestRule, CreditTables, ScoreBand, TransferCreditRule};
use crate::domain::curriculum::{BasePlanTemplate, CurriculumData};
use crate::domain::schedule::SlotKey;
use crate::domain::types::{Category, CreditStatus, Quarter};
use std::collections::BTreeMap;

fn course(
    department: &str,
    number: &str,
    name: &str,
    category: Category,
    units: u32,
    offering: Vec<Quarter>,
    prerequisites: Vec<CourseRef>,
) -> CourseRecord {
    CourseRecord {
        code: CourseCode::new(department, number),
        name: name.to_string(),
        description: String::new(),
        category,
        units,
        offering,
        prerequisites,
        credit: CreditStatus::NotEarned,
        quarter_taken: None,
    }
}

fn plan(quarters: &[(Quarter, &[&str])]) -> BasePlanTemplate {
    let mut template = BasePlanTemplate::default();
    for (quarter, keys) in quarters {
        template.quarters.insert(
            *quarter,
            keys.iter()
                .map(|k| SlotKey::parse(k).expect("fixture slot key"))
                .collect(),
        );
    }
    template
}

/// 测试用培养方案: 数学/COEN/工程入门/化学/英文/通识选修/填充支线,
/// CSE 与 WDE 两个专业基准计划, 以及 AP/转学分折抵规则表
pub fn create_test_curriculum() -> CurriculumData {
    let all = vec![Quarter::Fall, Quarter::Winter, Quarter::Spring];
    let fw = vec![Quarter::Fall, Quarter::Winter];
    let ws = vec![Quarter::Winter, Quarter::Spring];

    let mut catalogue = Catalogue::new();
    catalogue.branches.insert(
        "core_courses".to_string(),
        vec![course(
            "CORE",
            "0",
            "University Core",
            Category::HumanitiesAndSocialScience,
            4,
            all.clone(),
            vec![],
        )],
    );
    catalogue.branches.insert(
        "math_courses".to_string(),
        vec![
            course("MATH", "9", "Precalculus", Category::MathAndScience, 4, all.clone(), vec![]),
            course(
                "MATH",
                "11",
                "Calculus and Analytic Geometry I",
                Category::MathAndScience,
                4,
                all.clone(),
                vec![CourseRef::new("math_courses", "MATH", "9")],
            ),
            course(
                "MATH",
                "12",
                "Calculus and Analytic Geometry II",
                Category::MathAndScience,
                4,
                all.clone(),
                vec![CourseRef::new("math_courses", "MATH", "11")],
            ),
            course(
                "MATH",
                "13",
                "Calculus and Analytic Geometry III",
                Category::MathAndScience,
                4,
                all.clone(),
                vec![CourseRef::new("math_courses", "MATH", "12")],
            ),
        ],
    );
    catalogue.branches.insert(
        "coen_courses".to_string(),
        vec![
            course(
                "COEN",
                "10",
                "Introduction to Programming",
                Category::Engineering,
                4,
                all.clone(),
                vec![],
            ),
            course(
                "COEN",
                "11",
                "Advanced Programming",
                Category::Engineering,
                4,
                all.clone(),
                vec![CourseRef::new("coen_courses", "COEN", "10")],
            ),
            course(
                "COEN",
                "12",
                "Abstract Data Types and Data Structures",
                Category::Engineering,
                4,
                ws.clone(),
                vec![CourseRef::new("coen_courses", "COEN", "11")],
            ),
        ],
    );
    catalogue.branches.insert(
        "engineering_courses".to_string(),
        vec![course(
            "ENGR",
            "1",
            "Introduction to Engineering + Lab",
            Category::Engineering,
            2,
            fw.clone(),
            vec![],
        )],
    );
    catalogue.branches.insert(
        "chem_courses".to_string(),
        vec![course(
            "CHEM",
            "11",
            "General Chemistry I",
            Category::MathAndScience,
            4,
            all.clone(),
            vec![],
        )],
    );
    catalogue.branches.insert(
        "english_courses".to_string(),
        vec![
            course(
                "ENGL",
                "1",
                "Critical Thinking and Writing I",
                Category::HumanitiesAndSocialScience,
                4,
                fw.clone(),
                vec![],
            ),
            course(
                "ENGL",
                "2",
                "Critical Thinking and Writing II",
                Category::HumanitiesAndSocialScience,
                4,
                ws.clone(),
                vec![CourseRef::new("english_courses", "ENGL", "1")],
            ),
        ],
    );
    catalogue.branches.insert(
        "CI_courses".to_string(),
        vec![
            course(
                "C&I",
                "1",
                "Cultures and Ideas I",
                Category::HumanitiesAndSocialScience,
                4,
                fw,
                vec![],
            ),
            course(
                "C&I",
                "2",
                "Cultures and Ideas II",
                Category::HumanitiesAndSocialScience,
                4,
                ws,
                vec![CourseRef::new("CI_courses", "C&I", "1")],
            ),
        ],
    );

    let mut base_plans = BTreeMap::new();
    base_plans.insert(
        "cse".to_string(),
        plan(&[
            (Quarter::Fall, &["COEN10", "MATH9", "ENGL1", "ENGR1", "CORE0"][..]),
            (Quarter::Winter, &["COEN11", "MATH11", "ENGL2", "CORE0"][..]),
            (Quarter::Spring, &["COEN12", "MATH12", "CHEM11", "CORE0"][..]),
        ]),
    );
    base_plans.insert(
        "wde".to_string(),
        plan(&[
            (Quarter::Fall, &["COEN10", "MATH9", "ENGL1", "C&I1"][..]),
            (Quarter::Winter, &["COEN11", "MATH11", "ENGL2", "C&I2"][..]),
            (Quarter::Spring, &["COEN12", "MATH12", "CHEM11", "CORE0"][..]),
        ]),
    );

    let mut credit_tables = CreditTables::default();
    credit_tables.ap_tests.insert(
        "calculus_ab".to_string(),
        ApTestRule {
            name: "Calculus AB".to_string(),
            fulfillments: vec![ScoreBand {
                min_score: 4,
                max_score: 5,
                fulfillment: vec![CourseRef::new("math_courses", "MATH", "11")],
            }],
        },
    );
    credit_tables.ap_tests.insert(
        "calculus_bc".to_string(),
        ApTestRule {
            name: "Calculus BC".to_string(),
            fulfillments: vec![
                ScoreBand {
                    min_score: 3,
                    max_score: 3,
                    fulfillment: vec![CourseRef::new("math_courses", "MATH", "11")],
                },
                ScoreBand {
                    min_score: 4,
                    max_score: 5,
                    fulfillment: vec![
                        CourseRef::new("math_courses", "MATH", "11"),
                        CourseRef::new("math_courses", "MATH", "12"),
                    ],
                },
            ],
        },
    );
    credit_tables.ap_tests.insert(
        "computer_science_a".to_string(),
        ApTestRule {
            name: "Computer Science A".to_string(),
            fulfillments: vec![ScoreBand {
                min_score: 4,
                max_score: 5,
                fulfillment: vec![CourseRef::new("coen_courses", "COEN", "10")],
            }],
        },
    );
    credit_tables.transfer_credits.insert(
        "calculus_1".to_string(),
        TransferCreditRule {
            name: "Calculus I".to_string(),
            fulfillment: vec![CourseRef::new("math_courses", "MATH", "11")],
        },
    );
    credit_tables.transfer_credits.insert(
        "intro_programming".to_string(),
        TransferCreditRule {
            name: "Introductory Programming".to_string(),
            fulfillment: vec![CourseRef::new("coen_courses", "COEN", "10")],
        },
    );

    let data = CurriculumData {
        catalogue,
        base_plans,
        credit_tables,
        filler_branch: "core_courses".to_string(),
    };
    data.validate().expect("fixture curriculum is consistent");
    data
}
