use std::{str::FromStr, time::Duration};

use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};

use interface::{Asset, PriceSnapshot, ViewState};

/// 가격이 없을 때 표시하는 문자열
pub const PLACEHOLDER: &str = "—";

const STYLE: &str = "\
body{margin:0;min-height:100vh;background:linear-gradient(#172554,#000 40%);color:#fff;font-family:system-ui,sans-serif}\
header,footer{text-align:center;padding:3rem 1.5rem}\
h1{font-size:3.5rem;font-weight:900;margin:0;color:#c084fc}\
.tagline{font-size:1.5rem;color:#d8b4fe;margin-top:1rem}\
main{max-width:42rem;margin:0 auto;padding:0 1.5rem 3rem}\
.card{display:flex;align-items:center;gap:1.5rem;background:rgba(255,255,255,.1);border:1px solid rgba(255,255,255,.2);border-radius:1.5rem;padding:2.5rem;margin-bottom:2rem}\
.card .info{flex:1}\
.card h2{font-size:2.25rem;margin:0;color:#e879f9}\
.card .symbol{font-size:1.5rem;color:#d8b4fe;margin:.25rem 0 0}\
.card .price{font-size:3rem;font-weight:800;color:#f0abfc;margin:0}\
.skeleton{background:rgba(255,255,255,.05);animation:pulse 2s infinite}\
.skeleton .logo{width:80px;height:80px;border-radius:50%;background:rgba(255,255,255,.1)}\
.skeleton .bar{height:2rem;width:10rem;background:rgba(255,255,255,.2);border-radius:.25rem;margin-bottom:.75rem}\
.skeleton .bar.wide{height:3rem;width:14rem;background:rgba(255,255,255,.3)}\
.error{text-align:center;color:#f87171;font-size:1.25rem;margin-top:5rem}\
footer p{margin:.25rem;color:#9ca3af;font-size:.875rem}\
@keyframes pulse{50%{opacity:.5}}";

/// 달러 금액을 en-US 통화 형식으로 포맷합니다.
/// 소수점은 0~2자리, 불필요한 0은 표시하지 않습니다.
///
/// 65000.0 -> "$65,000", 3200.5 -> "$3,200.5", 0.123 -> "$0.12"
pub fn format_usd(value: f64) -> String {
    if !value.is_finite() {
        return PLACEHOLDER.to_string();
    }

    let (whole, frac) = round_to_cents(value.abs());

    let mut out = String::new();
    if value.is_sign_negative() {
        out.push('-');
    }
    out.push('$');
    out.push_str(&group_thousands(whole));

    if frac != 0 {
        if frac % 10 == 0 {
            out.push_str(&format!(".{}", frac / 10));
        } else {
            out.push_str(&format!(".{:02}", frac));
        }
    }

    out
}

/// 최단 십진 표기(1.005 -> "1.005")를 기준으로 센트 단위 반올림합니다.
/// 0.5는 0에서 먼 쪽으로. (정수부, 센트) 반환
fn round_to_cents(abs: f64) -> (u128, u128) {
    match Decimal::from_str(&abs.to_string()) {
        Ok(d) => {
            let rounded = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            let whole = rounded.trunc().to_u128().unwrap_or(0);
            let frac = (rounded.fract() * Decimal::ONE_HUNDRED)
                .to_u128()
                .unwrap_or(0);
            (whole, frac)
        }
        // Decimal 범위를 넘는 값
        Err(_) => {
            let cents = (abs * 100.0).round() as u128;
            (cents / 100, cents % 100)
        }
    }
}

fn group_thousands(n: u128) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(v) => format_usd(v),
        None => PLACEHOLDER.to_string(),
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn render_skeletons() -> String {
    let card = r#"<div class="card skeleton"><div class="logo"></div><div class="info"><div class="bar"></div><div class="bar wide"></div></div></div>"#;
    card.repeat(Asset::ALL.len())
}

fn render_card(asset: Asset, snapshot: &PriceSnapshot) -> String {
    format!(
        r#"<div class="card"><img src="{logo}" alt="{name} Logo" width="80" height="80"><div class="info"><h2>{name}</h2><p class="symbol">{symbol}</p></div><p class="price">{price}</p></div>"#,
        logo = asset.logo_url(),
        name = asset.display_name(),
        symbol = asset.symbol(),
        price = escape_html(&format_price(snapshot.get(asset))),
    )
}

/// 화면 상태를 HTML 페이지로 렌더링합니다
pub fn render_page(view: &ViewState, refresh: Duration) -> String {
    let body = match view {
        ViewState::Loading => render_skeletons(),
        ViewState::Error(message) => format!(r#"<p class="error">{}</p>"#, escape_html(message)),
        ViewState::Loaded(snapshot) => Asset::ALL
            .iter()
            .map(|a| render_card(*a, snapshot))
            .collect::<Vec<_>>()
            .join(""),
    };

    let secs = refresh.as_secs().max(1);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<meta http-equiv="refresh" content="{secs}">
<title>Crypto Prices</title>
<style>{STYLE}</style>
</head>
<body>
<header><h1>CRYPTO PRICES</h1><p class="tagline">Live • On Base</p></header>
<main>{body}</main>
<footer><p>Data from CoinGecko • Updates every {secs} seconds</p><p>Powered by Base Mini Apps</p></footer>
</body>
</html>
"#
    )
}
