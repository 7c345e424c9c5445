use serde::Serialize;

/// Hands `value` as indented JSON to `log_action`, but only when DEBUG is enabled.
pub(crate) fn with_pretty_json_debug<T, F>(value: &T, log_action: F)
where
    T: Serialize + ?Sized,
    F: FnOnce(&str),
{
    if !tracing::enabled!(tracing::Level::DEBUG) {
        return;
    }

    match serde_json::to_string_pretty(value) {
        Ok(pretty) => log_action(&pretty),
        Err(e) => log_action(&format!("<unserializable payload: {e}>")),
    }
}
