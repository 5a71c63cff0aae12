//! Prompt catalog.
//!
//! Every prompt sent to the completion service is built here. Document
//! outlines are compiled into the binary.

use super::providers::CompletionRequest;
use crate::models::{Answers, OrderProposal};

const REQUIREMENTS_SPECIFICATION_OUTLINE: &str = "\
# システム要求仕様書
## 1. システムの目的
## 2. 対象ユーザー
## 3. 機能要求
## 4. 非機能要求（性能・セキュリティ・可用性）
## 5. 制約条件
";

const REQUIREMENTS_DEFINITION_OUTLINE: &str = "\
# 要件定義書
## 1. 業務概要
## 2. 業務フロー
## 3. 機能要件
## 4. データ要件
## 5. 外部インターフェース
## 6. 移行・運用要件
";

const BASIC_DESIGN_OUTLINE: &str = "\
# 基本設計書
## 1. 画面概要
## 2. 画面レイアウト
## 3. 入出力項目
## 4. 画面遷移
## 5. イベント処理
## 6. エラー処理
";

const PAMPHLET_SYSTEM: &str = "あなたはシステム開発の専門家で、システム発注が初めての方にも分かりやすい用語で説明することに自信を持っています。";

const PREVIEW_SYSTEM: &str = "あなたはフロントエンド開発の専門家かつUIデザイナーです。コードのみを提供し、説明は含めません。全てのイベントとリンクはJavaScriptのアラートで表示し、'〇〇が実行されます'という形式で記述します。";

pub fn requirements_specification(answers: &Answers) -> CompletionRequest {
    CompletionRequest::new(
        "requirements_specification",
        "あなたはシステム要求仕様書の専門家です。簡潔に要点をまとめてください。",
        format!(
            "以下のプロジェクト要件に基づいて、システム要求仕様書の概要を作成してください。\n\
             詳細は省略し、主要なポイントのみを簡潔に記述してください。\n\n\
             プロジェクト要件:\n{}\n\
             テンプレート:\n{}",
            answers, REQUIREMENTS_SPECIFICATION_OUTLINE
        ),
    )
}

pub fn requirements_definition(answers: &Answers) -> CompletionRequest {
    CompletionRequest::new(
        "requirements_definition",
        "あなたは要件定義の専門家です。簡潔に要点をまとめてください。",
        format!(
            "以下のプロジェクト要件に基づいて、要件定義書の概要を作成してください。\n\
             詳細は省略し、主要なポイントのみを簡潔に記述してください。\n\n\
             プロジェクト要件:\n{}\n\
             テンプレート:\n{}",
            answers, REQUIREMENTS_DEFINITION_OUTLINE
        ),
    )
}

pub fn screen_list(answers: &Answers) -> CompletionRequest {
    CompletionRequest::new(
        "screen_list",
        "あなたはUIデザインの専門家です。主要な画面のみをリストアップしてください。",
        format!(
            "以下のプロジェクト要件に基づいて、想定される主要な画面の一覧を作成してください。\n\
             各画面名を簡潔に記述し、最大10個までのリストとして返してください。\n\n\
             プロジェクト要件:\n{}",
            answers
        ),
    )
}

pub fn total_workload(answers: &Answers) -> CompletionRequest {
    CompletionRequest::new(
        "total_workload",
        "あなたはプロジェクトマネージャーです。大まかな工数見積もりを提供してください。",
        format!(
            "以下のプロジェクト要件に基づいて、全体の工数見積もりの概要を作成してください。\n\
             各フェーズ（要件定義、設計、開発、テスト）の大まかな工数と合計を人日で表してください。\n\n\
             プロジェクト要件:\n{}",
            answers
        ),
    )
}

pub fn critique(answers: &Answers) -> CompletionRequest {
    CompletionRequest::new(
        "critique",
        "あなたはプロジェクト評価の専門家です。",
        format!(
            "以下のプロジェクト評価フォームの回答を分析し、プロジェクトの強みと弱み、改善点を指摘してください:\n\n{}",
            answers
        ),
    )
}

pub fn preview_screen_list(answers: &Answers) -> CompletionRequest {
    CompletionRequest::new(
        "preview_screen_list",
        "あなたはUIデザインの専門家です。主要な画面のみをリストアップしてください。",
        format!(
            "以下のプロジェクト要件に基づいて、最も重要な画面を3つ選んでください。\n\
             画面名のみを1行に1つずつ返してください。\n\n\
             プロジェクト要件:\n{}",
            answers
        ),
    )
}

pub fn title(screen: &str) -> CompletionRequest {
    pamphlet("title", "タイトル", 10, screen)
}

pub fn catchphrase(screen: &str) -> CompletionRequest {
    pamphlet("catchphrase", "キャッチコピー", 20, screen)
}

pub fn description(screen: &str) -> CompletionRequest {
    pamphlet("description", "説明書き", 100, screen)
}

fn pamphlet(purpose: &'static str, item: &str, max_chars: usize, screen: &str) -> CompletionRequest {
    CompletionRequest::new(
        purpose,
        PAMPHLET_SYSTEM,
        format!(
            "以下のプロジェクト要件に基づいて、システム開発のパンフレットの{item}を作成してください。\n\
             {item}は{max_chars}文字以内で簡潔に機能が分かる表現にしてください。\n\n\
             プロジェクト要件:\n{screen}"
        ),
    )
}

/// HTML mockup for `screen`, adapting `template` when one matched.
pub fn preview_html(screen: &str, template: Option<&str>) -> CompletionRequest {
    let mut prompt = format!(
        "以下の画面情報に基づいて、この画面のサンプルデザインをHTMLとTailwind CSSで作成してください。\n\
         必要に応じてJavaScriptも含めてください。\n\
         コードは一つのコードブロックで提供してください。\n\
         ボタンやリンク・リストボックスなどのインタラクティブな要素は実装してください。またidをつけてください。\n\
         全てのイベントとリンクは、JavaScriptのアラートで何が実行されるかを簡潔に表示するようにしてください。\n\
         例:\n\
         - ボタン: onclick=\"alert('ログイン処理が実行されます')\"\n\
         - リンク: onclick=\"event.preventDefault(); alert('ホームページへ遷移が実行されます')\"\n\
         説明や追加のコメントは含めず、実装のコードのみを返してください。\n\n\
         画面情報: {}\n",
        screen
    );
    if let Some(html) = template {
        prompt.push_str("\n以下のテンプレートをベースに、画面情報に合わせて調整してください:\n");
        prompt.push_str(html);
    }
    CompletionRequest::new("preview_html", PREVIEW_SYSTEM, prompt)
}

pub fn screen_workload(screen: &str, answers: &Answers) -> CompletionRequest {
    CompletionRequest::new(
        "screen_workload",
        "あなたはプロジェクトマネージャーです。",
        format!(
            "以下の画面と全体のプロジェクト要件に基づいて、この画面の開発工数を見積もってください。\n\
             工数は人日で表してください。\n\n\
             画面名: {}\n\
             プロジェクト要件:\n{}",
            screen, answers
        ),
    )
}

pub fn basic_design(screen: &str, answers: &Answers) -> CompletionRequest {
    CompletionRequest::new(
        "basic_design",
        "あなたはシステム設計の専門家です。",
        format!(
            "以下の画面と全体のプロジェクト要件に基づいて、この画面の基本設計を作成してください。\n\
             テンプレートに従って、各セクションを適切に埋めてください。\n\n\
             画面名: {}\n\
             プロジェクト要件:\n{}\n\
             テンプレート:\n{}",
            screen, answers, BASIC_DESIGN_OUTLINE
        ),
    )
}

pub fn screen_sample(screen: &str, answers: &Answers) -> CompletionRequest {
    CompletionRequest::new(
        "screen_sample",
        "あなたはUIデザイナーです。",
        format!(
            "以下の画面と全体のプロジェクト要件に基づいて、この画面のサンプルデザインをHTMLとTailwind CSSで作成してください。\n\
             必要に応じてJavaScriptも含めてください。\n\
             コードは一つのコードブロックで提供してください。\n\n\
             画面名: {}\n\
             プロジェクト要件:\n{}",
            screen, answers
        ),
    )
}

/// Structured workload estimate for an order proposal. The reply must be a
/// fenced JSON object keyed by screen and event names.
pub fn order_estimate(proposal: &OrderProposal) -> CompletionRequest {
    let section = |value: serde_json::Result<String>| value.unwrap_or_default();

    CompletionRequest::new(
        "order_estimate",
        "You are an expert system architect and project estimator.",
        format!(
            r#"Given the following project details, provide an estimate for the workload and difficulty of each component:

Screens:
{screens}

Events:
{events}

Entities:
{entities}

Relations:
{relations}

Please provide the estimate as a ```json code block in the following format:
{{
    "screens": {{
        "画面名": {{"workload": "X 日", "difficulty": "時給:Y円", "tests": ["test1", "test2"]}}
    }},
    "events": {{
        "イベント名": {{"workload": "X 日", "difficulty": "時給:Y円", "tests": ["test1", "test2"]}}
    }},
    "database": {{"workload": "X 日", "difficulty": "時給:Y円", "tests": ["test1", "test2"]}}
}}

workloadは日数で返す 開発者歴が3年程度を想定してください
difficultyは難易度に応じて時給1000円から10000円の範囲で設定してください。難しいタスクほど高い時給になります。
testsはテストケースをシンプルに分かりやすく返す 例: ["ログイン成功", "ログイン失敗"]
"#,
            screens = section(serde_json::to_string_pretty(&proposal.screens)),
            events = section(serde_json::to_string_pretty(&proposal.events)),
            entities = section(serde_json::to_string_pretty(&proposal.entities)),
            relations = section(serde_json::to_string_pretty(&proposal.relations)),
        ),
    )
    .with_temperature(0.5)
}
