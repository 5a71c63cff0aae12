//! Fixed-rule simulation.
//!
//! Maps the multiple-choice answers to questions 1-7 onto canned proposal
//! text, a screen list, a rough workload and one of the built-in templates.
//! No model call is made, so the same answers always give the same result.

use super::templates::{self, HtmlTemplate};
use crate::models::{Answers, SimulationResponse};

const DEFAULT_TEMPLATE: &str = "pattern1.html";

/// Question 1: project purpose.
struct PurposeRule {
    answer: &'static str,
    text: &'static str,
    fallback_template: &'static str,
}

const PURPOSE_RULES: &[PurposeRule] = &[
    PurposeRule {
        answer: "社内業務の効率化",
        text: "社内業務の手作業を減らし、情報を一元管理することで業務効率を高めるシステムをご提案します。",
        fallback_template: "pattern1.html",
    },
    PurposeRule {
        answer: "売上拡大・集客",
        text: "オンラインでの接点を増やし、売上と集客の拡大につなげるシステムをご提案します。",
        fallback_template: "pattern4.html",
    },
    PurposeRule {
        answer: "顧客サービス向上",
        text: "お客様からの要望に素早く応え、満足度を高めるシステムをご提案します。",
        fallback_template: "pattern5.html",
    },
    PurposeRule {
        answer: "新規事業の立ち上げ",
        text: "新規事業を小さく始めて素早く検証できるシステムをご提案します。",
        fallback_template: "pattern2.html",
    },
];

/// Question 2: main feature. Decides the template and the base workload.
struct FeatureRule {
    answer: &'static str,
    text: &'static str,
    template: &'static str,
    screens: &'static [&'static str],
    base_days: u32,
}

const FEATURE_RULES: &[FeatureRule] = &[
    FeatureRule {
        answer: "データ入力・管理",
        text: "データの登録・検索・一覧表示を中心とした管理画面を構築します。",
        template: "pattern1.html",
        screens: &["ログイン画面", "データ登録画面", "データ一覧画面", "データ詳細画面"],
        base_days: 30,
    },
    FeatureRule {
        answer: "会員管理・ログイン",
        text: "会員登録とログイン認証を備えた会員向けの画面を構築します。",
        template: "pattern2.html",
        screens: &["ログイン画面", "会員登録画面", "マイページ", "会員一覧画面"],
        base_days: 35,
    },
    FeatureRule {
        answer: "レポート・分析",
        text: "蓄積したデータを集計し、グラフやレポートで可視化するダッシュボードを構築します。",
        template: "pattern3.html",
        screens: &["ログイン画面", "ダッシュボード", "レポート出力画面", "分析条件設定画面"],
        base_days: 40,
    },
    FeatureRule {
        answer: "予約・注文受付",
        text: "商品やサービスの予約・注文をオンラインで受け付ける画面を構築します。",
        template: "pattern4.html",
        screens: &["商品一覧画面", "カート画面", "注文確認画面", "注文管理画面"],
        base_days: 45,
    },
    FeatureRule {
        answer: "問い合わせ対応",
        text: "問い合わせの受付から対応状況の管理までを行う画面を構築します。",
        template: "pattern5.html",
        screens: &["お問い合わせ画面", "問い合わせ一覧画面", "対応履歴画面"],
        base_days: 25,
    },
];

/// Questions 3-5 adjust the workload and add a sentence each.
struct Adjustment {
    answer: &'static str,
    text: &'static str,
    extra_days: u32,
}

const USER_SCALE_RULES: &[Adjustment] = &[
    Adjustment { answer: "10人未満", text: "少人数での利用を想定し、シンプルな構成とします。", extra_days: 0 },
    Adjustment { answer: "10〜50人", text: "部署単位での利用を想定し、権限管理を含めます。", extra_days: 5 },
    Adjustment { answer: "50〜300人", text: "全社規模での利用を想定し、権限管理と操作ログを含めます。", extra_days: 10 },
    Adjustment { answer: "300人以上", text: "大規模利用を想定し、性能と可用性を考慮した構成とします。", extra_days: 20 },
];

const DEVICE_RULES: &[Adjustment] = &[
    Adjustment { answer: "PCのみ", text: "PCブラウザ向けに最適化します。", extra_days: 0 },
    Adjustment { answer: "スマートフォン中心", text: "スマートフォンでの操作を優先した画面設計とします。", extra_days: 5 },
    Adjustment { answer: "PC・スマートフォン両方", text: "PCとスマートフォンの両方に対応するレスポンシブデザインとします。", extra_days: 8 },
];

const INTEGRATION_RULES: &[Adjustment] = &[
    Adjustment { answer: "なし", text: "", extra_days: 0 },
    Adjustment { answer: "既存システムと連携", text: "既存システムとのデータ連携機能を含めます。", extra_days: 10 },
    Adjustment { answer: "外部サービスと連携", text: "外部サービスのAPI連携機能を含めます。", extra_days: 8 },
];

/// Questions 6 and 7 only add notes.
const SCHEDULE_NOTES: &[(&str, &str)] = &[
    ("1ヶ月以内", "短納期のため、機能を絞った段階リリースをおすすめします。"),
    ("3ヶ月以内", "3ヶ月での初回リリースを目標とします。"),
    ("6ヶ月以内", "6ヶ月の期間で段階的に機能を追加します。"),
    ("未定", "スケジュールはご相談のうえ決定します。"),
];

const BUDGET_NOTES: &[(&str, &str)] = &[
    ("100万円未満", "ご予算に合わせて最小構成からのご提案となります。"),
    ("100〜300万円", "主要機能を中心とした構成でご提案します。"),
    ("300〜1000万円", "運用まで見据えた構成でご提案します。"),
    ("1000万円以上", "将来の拡張を見据えた構成でご提案します。"),
];

/// Runs the rule table over `answers`.
pub fn simulate(answers: &Answers) -> SimulationResponse {
    let purpose = first_match(answers, "1", PURPOSE_RULES, |r| r.answer);
    let feature = first_match(answers, "2", FEATURE_RULES, |r| r.answer);

    let template_name = feature
        .map(|f| f.template)
        .or_else(|| purpose.map(|p| p.fallback_template))
        .unwrap_or(DEFAULT_TEMPLATE);
    let template = resolve_template(template_name);

    let adjustments: Vec<&Adjustment> = [
        ("3", USER_SCALE_RULES),
        ("4", DEVICE_RULES),
        ("5", INTEGRATION_RULES),
    ]
    .into_iter()
    .filter_map(|(question, rules)| first_match(answers, question, rules, |r| r.answer))
    .collect();

    let mut sentences: Vec<&str> = Vec::new();
    sentences.extend(purpose.map(|p| p.text));
    sentences.extend(feature.map(|f| f.text));
    sentences.extend(adjustments.iter().map(|a| a.text));
    sentences.extend(first_match(answers, "6", SCHEDULE_NOTES, |(a, _)| *a).map(|(_, note)| *note));
    sentences.extend(first_match(answers, "7", BUDGET_NOTES, |(a, _)| *a).map(|(_, note)| *note));
    sentences.retain(|s| !s.is_empty());

    let screens: Vec<String> = feature
        .map(|f| f.screens)
        .unwrap_or(&["ログイン画面", "トップ画面", "一覧画面"])
        .iter()
        .map(|s| s.to_string())
        .collect();

    let base_days = feature.map_or(30, |f| f.base_days);
    let total_days = base_days + adjustments.iter().map(|a| a.extra_days).sum::<u32>();

    SimulationResponse {
        proposal: sentences.join("\n"),
        screens,
        estimate_develop: phase_breakdown(total_days),
        template: template.name.to_string(),
        description_file: template.description_file.to_string(),
        preview: template.html.to_string(),
    }
}

fn resolve_template(name: &str) -> &'static HtmlTemplate {
    templates::by_name(name).unwrap_or(&templates::TEMPLATES[0])
}

/// The first rule matching any of the choices given for `question`.
fn first_match<'r, R>(
    answers: &Answers,
    question: &str,
    rules: &'r [R],
    key: impl Fn(&R) -> &str,
) -> Option<&'r R> {
    answers
        .choices(question)
        .iter()
        .find_map(|choice| rules.iter().find(|rule| key(*rule) == choice.trim()))
}

/// Splits `total` person-days over the four phases.
fn phase_breakdown(total: u32) -> String {
    let requirements = total * 15 / 100;
    let design = total * 20 / 100;
    let test = total * 20 / 100;
    let development = total - requirements - design - test;

    format!(
        "要件定義: {}人日\n設計: {}人日\n開発: {}人日\nテスト: {}人日\n合計: {}人日",
        requirements, design, development, test, total
    )
}
