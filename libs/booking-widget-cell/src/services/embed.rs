use tracing::debug;

use crate::models::{
    ButtonStyle, WidgetConfig, WidgetConfigQuery, WidgetError, DARKEN_AMOUNT, DEFAULT_BUTTON_TEXT,
    DEFAULT_PRIMARY_COLOR,
};

/// Merge host page options over the defaults and derive the hover colour and iframe URL.
pub fn resolve_widget_config(
    query: &WidgetConfigQuery,
    default_domain: &str,
) -> Result<WidgetConfig, WidgetError> {
    let button_style = match non_blank(&query.button_style) {
        Some(style) => style.parse::<ButtonStyle>()?,
        None => ButtonStyle::default(),
    };

    let button_text = non_blank(&query.button_text)
        .unwrap_or(DEFAULT_BUTTON_TEXT)
        .to_string();

    let primary_color = non_blank(&query.primary_color)
        .unwrap_or(DEFAULT_PRIMARY_COLOR)
        .to_string();
    let primary_color_dark = adjust_color(&primary_color, DARKEN_AMOUNT)?;

    let domain = normalize_domain(non_blank(&query.domain).unwrap_or(default_domain))?;
    let iframe_src = format!("{}/widget", domain);

    debug!("Resolved widget config for {} ({} button)", domain, button_style);

    Ok(WidgetConfig {
        button_style,
        button_text,
        primary_color,
        primary_color_dark,
        domain,
        iframe_src,
    })
}

/// Shift every channel of a `#RRGGBB` colour by `amount`, clamping to 0..=255.
/// Output is lowercase hex.
pub fn adjust_color(color: &str, amount: i16) -> Result<String, WidgetError> {
    let invalid = || WidgetError::InvalidColor(color.to_string());

    let hex = color.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let mut adjusted = String::from("#");
    for start in [0, 2, 4] {
        let channel = hex
            .get(start..start + 2)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(invalid)?;
        let shifted = (i16::from(channel) + amount).clamp(0, 255);
        adjusted.push_str(&format!("{:02x}", shifted));
    }

    Ok(adjusted)
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn normalize_domain(domain: &str) -> Result<String, WidgetError> {
    let trimmed = domain.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .is_some_and(|host| !host.is_empty() && !host.contains(char::is_whitespace));

    if !has_host {
        return Err(WidgetError::InvalidDomain(domain.to_string()));
    }
    Ok(trimmed.to_string())
}
