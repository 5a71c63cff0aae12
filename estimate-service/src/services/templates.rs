//! Built-in static HTML templates.

/// A static screen template with the description document that goes with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlTemplate {
    pub name: &'static str,
    pub description_file: &'static str,
    pub keywords: &'static [&'static str],
    pub html: &'static str,
}

pub const TEMPLATES: &[HtmlTemplate] = &[
    HtmlTemplate {
        name: "pattern1.html",
        description_file: "pattern1.md",
        keywords: &["データ", "入力", "登録", "一覧", "管理", "form", "list"],
        html: r#"<div class="max-w-4xl mx-auto p-6">
  <h1 class="text-2xl font-bold mb-4">データ登録</h1>
  <form id="entry-form" class="space-y-4">
    <input id="entry-name" class="border rounded w-full p-2" placeholder="名称">
    <button id="entry-submit" class="bg-blue-600 text-white px-4 py-2 rounded" onclick="event.preventDefault(); alert('登録処理が実行されます')">登録</button>
  </form>
  <table id="entry-table" class="mt-6 w-full border"></table>
</div>"#,
    },
    HtmlTemplate {
        name: "pattern2.html",
        description_file: "pattern2.md",
        keywords: &["ログイン", "認証", "会員", "パスワード", "login", "auth"],
        html: r#"<div class="min-h-screen flex items-center justify-center bg-gray-100">
  <form id="login-form" class="bg-white p-8 rounded shadow w-80 space-y-4">
    <input id="login-email" type="email" class="border rounded w-full p-2" placeholder="メールアドレス">
    <input id="login-password" type="password" class="border rounded w-full p-2" placeholder="パスワード">
    <button id="login-submit" class="bg-blue-600 text-white w-full py-2 rounded" onclick="event.preventDefault(); alert('ログイン処理が実行されます')">ログイン</button>
  </form>
</div>"#,
    },
    HtmlTemplate {
        name: "pattern3.html",
        description_file: "pattern3.md",
        keywords: &["ダッシュボード", "レポート", "分析", "集計", "グラフ", "dashboard", "report"],
        html: r#"<div class="grid grid-cols-3 gap-4 p-6">
  <div id="kpi-sales" class="bg-white rounded shadow p-4">売上</div>
  <div id="kpi-orders" class="bg-white rounded shadow p-4">受注件数</div>
  <div id="kpi-users" class="bg-white rounded shadow p-4">利用者数</div>
  <button id="report-export" class="col-span-3 bg-green-600 text-white py-2 rounded" onclick="alert('レポート出力が実行されます')">レポート出力</button>
</div>"#,
    },
    HtmlTemplate {
        name: "pattern4.html",
        description_file: "pattern4.md",
        keywords: &["商品", "購入", "カート", "注文", "予約", "決済", "shop", "cart"],
        html: r#"<div class="max-w-5xl mx-auto p-6">
  <ul id="product-list" class="grid grid-cols-3 gap-4">
    <li class="border rounded p-4">商品A <button id="add-cart-a" class="bg-orange-500 text-white px-2 rounded" onclick="alert('カート追加が実行されます')">カートに入れる</button></li>
  </ul>
  <button id="checkout" class="mt-6 bg-blue-600 text-white px-4 py-2 rounded" onclick="alert('注文確定が実行されます')">注文する</button>
</div>"#,
    },
    HtmlTemplate {
        name: "pattern5.html",
        description_file: "pattern5.md",
        keywords: &["問い合わせ", "顧客", "相談", "チャット", "サポート", "contact", "support"],
        html: r#"<div class="max-w-xl mx-auto p-6">
  <h1 class="text-xl font-bold mb-4">お問い合わせ</h1>
  <textarea id="contact-message" class="border rounded w-full p-2 h-32" placeholder="お問い合わせ内容"></textarea>
  <button id="contact-send" class="mt-4 bg-blue-600 text-white px-4 py-2 rounded" onclick="alert('問い合わせ送信が実行されます')">送信</button>
</div>"#,
    },
];

/// Looks up a template by file name.
pub fn by_name(name: &str) -> Option<&'static HtmlTemplate> {
    TEMPLATES.iter().find(|t| t.name == name)
}

/// Best-effort keyword match of `text` against the catalog.
///
/// The template with the most keyword hits wins; ties go to the earlier
/// entry. No hits means no template.
pub fn match_template(text: &str) -> Option<&'static HtmlTemplate> {
    let haystack = text.to_lowercase();

    let mut best: Option<(&'static HtmlTemplate, usize)> = None;
    for template in TEMPLATES {
        let hits = template
            .keywords
            .iter()
            .filter(|keyword| haystack.contains(*keyword))
            .count();
        if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
            best = Some((template, hits));
        }
    }
    best.map(|(template, _)| template)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_screen_matches_login_template() {
        assert_eq!(match_template("ログイン画面").unwrap().name, "pattern2.html");
        assert_eq!(match_template("User Login").unwrap().name, "pattern2.html");
    }

    #[test]
    fn most_hits_wins() {
        // "レポート" and "分析" beat the single "管理" hit.
        let template = match_template("売上分析レポート管理").unwrap();
        assert_eq!(template.name, "pattern3.html");
    }

    #[test]
    fn unmatched_text_yields_none() {
        assert!(match_template("設定").is_none());
    }

    #[test]
    fn names_are_unique_and_resolvable() {
        for template in TEMPLATES {
            assert_eq!(by_name(template.name), Some(template));
        }
        assert!(by_name("pattern9.html").is_none());
    }
}
