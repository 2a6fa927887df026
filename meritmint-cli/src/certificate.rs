//! Printable HTML certificate built from one persisted record.

use meritmint_ipfs::gateway_url;
use meritmint_registry::state::AchievementRecord;

pub fn render_certificate(record: &AchievementRecord) -> String {
    let mut rows = String::new();
    for attribute in &record.attributes {
        rows.push_str(&format!(
            "        <tr><th>{}</th><td>{}</td></tr>\n",
            escape(&attribute.trait_type),
            escape(&attribute.value),
        ));
    }

    let metadata_link = match record.ipfs_hash.as_deref() {
        Some(cid) => format!(
            "      <p class=\"meta\"><a href=\"{}\">metadata</a></p>\n",
            gateway_url(cid)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>Certificate — {name}</title>
    <style>
      body {{ font-family: Georgia, serif; margin: 4em auto; max-width: 44em; }}
      h1 {{ text-align: center; letter-spacing: 0.1em; }}
      .description {{ font-style: italic; margin: 2em 0; }}
      table {{ width: 100%; border-collapse: collapse; }}
      th, td {{ text-align: left; padding: 0.4em; border-bottom: 1px solid #ccc; }}
      .meta {{ color: #666; font-size: 0.85em; word-break: break-all; }}
    </style>
  </head>
  <body>
    <h1>Certificate of Achievement</h1>
    <h2>{name}</h2>
    <p class="description">{description}</p>
    <table>
{rows}    </table>
    <p class="meta">Token #{token_id} &middot; minted {minted_at}</p>
    <p class="meta">Transaction {transaction_hash}</p>
{metadata_link}  </body>
</html>
"#,
        name = escape(&record.name),
        description = escape(&record.description),
        rows = rows,
        token_id = escape(&record.token_id),
        minted_at = record.minted_at.format("%B %e, %Y"),
        transaction_hash = escape(&record.transaction_hash),
        metadata_link = metadata_link,
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
