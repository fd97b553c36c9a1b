use gtk::gdk;
use gtk4 as gtk;
use lootreel::Tier;
use lootreel::tier::TierTable;

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.lootreel-window {
    background-color: #0d1117;
    color: #ffffff;
}
.lootreel-title {
    font-size: 28pt;
    font-weight: bold;
}
.lootreel-reel {
    background-color: #0d1117;
}
.lootreel-item {
    font-size: 22pt;
    font-weight: bold;
}
.lootreel-tier {
    font-size: 16pt;
}
.lootreel-open {
    font-size: 18pt;
    font-weight: bold;
    padding: 18px 40px;
    background: #4b69ff;
    color: #ffffff;
}
.lootreel-count, .lootreel-status {
    font-size: 11pt;
    color: #8b949e;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

/// Pango markup showing `text` in the tier's colour.
pub fn tier_markup(table: &TierTable, tier: Tier, text: &str) -> String {
    format!(
        "<span foreground=\"{}\">{}</span>",
        table.entry(tier).hex(),
        glib::markup_escape_text(text)
    )
}
