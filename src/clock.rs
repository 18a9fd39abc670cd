//! Wall clock readout in a fixed time zone

use js_sys::{Array, Date, Intl, Object, Reflect};
use wasm_bindgen::prelude::*;

use crate::error::SceneError;

/// `HH:MM:SS`, 24-hour
pub fn format_hms(hours: u32, minutes: u32, seconds: u32) -> String {
    // some engines report midnight as hour 24
    format!("{:02}:{:02}:{:02}", hours % 24, minutes, seconds)
}

fn formatter(time_zone: &str) -> Result<Intl::DateTimeFormat, JsValue> {
    let options = Object::new();
    for (key, value) in [
        ("timeZone", time_zone),
        ("hour", "2-digit"),
        ("minute", "2-digit"),
        ("second", "2-digit"),
        ("hourCycle", "h23"),
    ] {
        Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_str(value))?;
    }

    let locales = Array::of1(&JsValue::from_str("en-US"));
    Ok(Intl::DateTimeFormat::new(&locales, &options))
}

/// Numeric value of one formatted `hour`, `minute` or `second` part
pub fn parse_field(kind: &str, value: &str) -> Result<u32, SceneError> {
    value
        .trim()
        .parse()
        .map_err(|_| SceneError::Clock(format!("unreadable {} '{}'", kind, value)))
}

fn read_part(part: &JsValue) -> Result<(String, String), JsValue> {
    let field = |name: &str| -> Result<String, JsValue> {
        Ok(Reflect::get(part, &JsValue::from_str(name))?.as_string().unwrap_or_default())
    };
    Ok((field("type")?, field("value")?))
}

/// Current time in `time_zone` as `HH:MM:SS`
#[wasm_bindgen]
pub fn clock_text(time_zone: &str) -> Result<String, JsValue> {
    let parts = formatter(time_zone)?.format_to_parts(&Date::new_0());

    let (mut hours, mut minutes, mut seconds) = (0, 0, 0);
    for entry in parts.iter() {
        let (kind, value) = read_part(&entry)?;
        let slot = match kind.as_str() {
            "hour" => &mut hours,
            "minute" => &mut minutes,
            "second" => &mut seconds,
            _ => continue,
        };
        *slot = parse_field(&kind, &value)?;
    }

    Ok(format_hms(hours, minutes, seconds))
}

/// Write the current time into the element with `element_id`
#[wasm_bindgen]
pub fn update_clock(element_id: &str, time_zone: &str) -> Result<(), JsValue> {
    let element = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(element_id))
        .ok_or_else(|| SceneError::MissingElement(element_id.to_string()))?;

    element.set_text_content(Some(&clock_text(time_zone)?));
    Ok(())
}
