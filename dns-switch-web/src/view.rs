//! 状态页面（单页 HTML，无模板引擎）

use std::fmt::Write;

use dns_switch_core::{ObservedStatus, StatusSnapshot};

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse;margin-bottom:1.5em;min-width:40em}\
th,td{border:1px solid #ccc;padding:.4em .8em;text-align:left}\
.enable{color:#1a7f37}.disable{color:#cf222e}.error{color:#9a6700}";

const SCRIPT: &str = r"async function toggleDomain(recordId, action) {
  const resp = await fetch('/toggle_domain', {
    method: 'POST',
    headers: {'Content-Type': 'application/json'},
    body: JSON.stringify({record_id: recordId, action: action})
  });
  const data = await resp.json();
  if (data.status !== 'success') {
    alert('操作失败: ' + data.error);
  }
  location.reload();
}";

/// Minimal HTML escaping for text and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render the grouped status page.
pub fn render_index(snapshot: &StatusSnapshot) -> String {
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html><html lang=\"zh-CN\"><head><meta charset=\"utf-8\">\
         <title>域名状态</title><style>{STYLE}</style></head><body><h1>域名状态</h1>"
    );

    for (group, results) in snapshot.groups() {
        let _ = write!(
            html,
            "<h2>{}</h2><table><tr><th>域名</th><th>Record ID</th><th>状态</th><th>操作</th></tr>",
            escape(group)
        );
        for r in results {
            let (action, label) = match r.status {
                ObservedStatus::Enable => ("stop", "停止"),
                ObservedStatus::Disable | ObservedStatus::Error => ("start", "启动"),
            };
            let id = escape(&r.record_id);
            let _ = write!(
                html,
                "<tr><td>{name}</td><td>{id}</td><td class=\"{status}\">{status}</td>\
                 <td><button data-record-id=\"{id}\" onclick=\"toggleDomain(this.dataset.recordId, '{action}')\">{label}</button></td></tr>",
                name = escape(&r.name),
                status = r.status,
            );
        }
        html.push_str("</table>");
    }

    let _ = write!(
        html,
        "<p><small>{}</small></p><script>{SCRIPT}</script></body></html>",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    html
}
