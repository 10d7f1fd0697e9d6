//! HTML for the order page.
//!
//! One page: a layout wrapping the order table. Each row carries a
//! status-change form (`orderStatus` = `<id>_<status>`) and a notify form
//! (`sendMessageTo` = `<id>`). All order fields are HTML-escaped.

use std::fmt::{self, Write};

use omnom_orders::{Order, OrderStatus, StatusChange};

/// Render the full order page.
///
/// The writers are generic over `fmt::Write`; a `String` sink never
/// reports an error, so the results are discarded here.
pub fn render_order_page(orders: &[Order]) -> String {
    let mut body = String::new();
    let _ = render_orders_table(&mut body, orders);
    let mut out = String::with_capacity(body.len() + 512);
    let _ = render_layout(&mut out, "Orders", &body);
    out
}

fn render_layout(out: &mut impl Write, title: &str, body: &str) -> fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "  <meta charset=\"utf-8\">")?;
    writeln!(out, "  <title>OmNomNom Foods | {}</title>", escape(title))?;
    writeln!(
        out,
        "  <link rel=\"stylesheet\" href=\"/static/css/orders.css\">"
    )?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "  <header><h1>OmNomNom Foods</h1></header>")?;
    writeln!(out, "  <main>")?;
    out.write_str(body)?;
    writeln!(out, "  </main>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

fn render_orders_table(out: &mut impl Write, orders: &[Order]) -> fmt::Result {
    writeln!(out, "    <table class=\"orders\">")?;
    writeln!(
        out,
        "      <thead><tr><th>Name</th><th>Phone</th><th>Items</th><th>Status</th><th>Update</th><th>Notify</th></tr></thead>"
    )?;
    writeln!(out, "      <tbody>")?;
    if orders.is_empty() {
        writeln!(out, "        <tr><td colspan=\"6\">No orders.</td></tr>")?;
    }
    for o in orders {
        render_order_row(out, o)?;
    }
    writeln!(out, "      </tbody>")?;
    writeln!(out, "    </table>")
}

fn render_order_row(out: &mut impl Write, o: &Order) -> fmt::Result {
    writeln!(
        out,
        "        <tr id=\"order-{}\" class=\"status-{}\">",
        escape(&o.id),
        o.status
    )?;
    writeln!(out, "          <td>{}</td>", escape(&o.name))?;
    writeln!(out, "          <td>{}</td>", escape(&o.phone))?;

    write!(out, "          <td><ul>")?;
    for item in &o.items {
        write!(out, "<li>{}</li>", escape(item))?;
    }
    writeln!(out, "</ul></td>")?;

    writeln!(out, "          <td class=\"status\">{}</td>", o.status)?;

    writeln!(out, "          <td>")?;
    writeln!(out, "            <form method=\"post\" action=\"/\">")?;
    for s in OrderStatus::ALL {
        let wire = StatusChange::new(o.id.clone(), s).to_wire();
        let disabled = if s == o.status { " disabled" } else { "" };
        writeln!(
            out,
            "              <button type=\"submit\" name=\"orderStatus\" value=\"{}\"{}>{}</button>",
            escape(&wire),
            disabled,
            s
        )?;
    }
    writeln!(out, "            </form>")?;
    writeln!(out, "          </td>")?;

    writeln!(out, "          <td>")?;
    writeln!(out, "            <form method=\"post\" action=\"/notifyCustomer\">")?;
    writeln!(
        out,
        "              <button type=\"submit\" name=\"sendMessageTo\" value=\"{}\">Send SMS</button>",
        escape(&o.id)
    )?;
    writeln!(out, "            </form>")?;
    writeln!(out, "          </td>")?;
    writeln!(out, "        </tr>")
}

/// Minimal HTML escaping for text and double-quoted attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use omnom_orders::seed_orders;

    #[test]
    fn page_lists_every_seed_order_with_both_forms() {
        let html = render_order_page(&seed_orders());
        for o in seed_orders() {
            assert!(html.contains(&o.name), "missing {}", o.name);
            assert!(html.contains(&format!("name=\"sendMessageTo\" value=\"{}\"", o.id)));
            for s in OrderStatus::ALL {
                assert!(html.contains(&format!("value=\"{}_{}\"", o.id, s)));
            }
        }
        assert!(html.contains("/static/css/orders.css"));
    }

    #[test]
    fn current_status_button_is_disabled() {
        let html = render_order_page(&seed_orders()[..1]);
        assert!(html.contains("value=\"c2972b5b4eef349fb1e5cc3e3150a2b6_pending\" disabled>"));
        assert!(html.contains("value=\"c2972b5b4eef349fb1e5cc3e3150a2b6_confirmed\">"));
    }

    #[test]
    fn order_fields_are_escaped() {
        let o = Order::new(
            "id\"x",
            "<script>alert(1)</script>",
            "+1 & 2",
            ["Fish & Chips"],
            OrderStatus::Pending,
        );
        let html = render_order_page(&[o]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("Fish &amp; Chips"));
        assert!(html.contains("id&quot;x"));
    }

    #[test]
    fn page_is_one_complete_document() {
        let html = render_order_page(&seed_orders());
        assert!(html.starts_with("<!DOCTYPE html>\n"));
        assert!(html.ends_with("</html>\n"));
        assert_eq!(html.matches("<table class=\"orders\">").count(), 1);
    }

    #[test]
    fn empty_store_renders_placeholder_row() {
        let html = render_order_page(&[]);
        assert!(html.contains("No orders."));
    }
}
