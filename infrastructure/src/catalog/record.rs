//! Typed readers over the content store's dynamic record properties
//!
//! Store records arrive as pages whose `properties` map is shaped by
//! property type (`title`, `rich_text`, `select`, ...). All
//! property-shape guessing is confined to these helpers; the adapters
//! hand out typed entities only.

use serde_json::Value;

fn plain_text_of(fragments: &Value) -> Option<String> {
    let text = fragments.as_array()?.first()?.get("plain_text")?.as_str()?;
    Some(text.to_string())
}

/// `properties[name].title[0].plain_text`
pub(crate) fn title_text(properties: &Value, name: &str) -> Option<String> {
    plain_text_of(properties.get(name)?.get("title")?)
}

/// `properties[name].rich_text[0].plain_text`
pub(crate) fn rich_text(properties: &Value, name: &str) -> Option<String> {
    plain_text_of(properties.get(name)?.get("rich_text")?)
}

/// `properties[name].select.name`
pub(crate) fn select_name(properties: &Value, name: &str) -> Option<String> {
    let value = properties.get(name)?.get("select")?.get("name")?.as_str()?;
    Some(value.to_string())
}

/// `properties[name].multi_select[].name`
pub(crate) fn multi_select_names(properties: &Value, name: &str) -> Vec<String> {
    properties
        .get(name)
        .and_then(|p| p.get("multi_select"))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| Some(item.get("name")?.as_str()?.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// `properties[name].number`, truncating fractional values
pub(crate) fn number(properties: &Value, name: &str) -> Option<i64> {
    let value = properties.get(name)?.get("number")?;
    value.as_i64().or_else(|| value.as_f64().map(|f| f as i64))
}

/// `properties[name].url`
pub(crate) fn url(properties: &Value, name: &str) -> Option<String> {
    let value = properties.get(name)?.get("url")?.as_str()?;
    Some(value.to_string())
}
