use web_sys::window;

pub fn get_env_var(key: &str) -> Option<String> {
    let window = window()?;

    // Get the ENV_CONFIG object
    let env_config = js_sys::Reflect::get(&window, &"ENV_CONFIG".into()).ok()?;

    // Check if env_config is undefined
    if env_config.is_undefined() {
        log::warn!("ENV_CONFIG is undefined - environment variables not loaded");
        return None;
    }

    let value = js_sys::Reflect::get(&env_config, &key.into()).ok()?;

    // Numbers are accepted too, e.g. RESULTS_MAX_ATTEMPTS: 8
    if value.is_undefined() {
        log::debug!("Environment variable '{}' is undefined", key);
        None
    } else if let Some(number) = value.as_f64() {
        Some(number.to_string())
    } else {
        value.as_string()
    }
}

pub fn get_app_name() -> String {
    get_env_var("APP_NAME").unwrap_or_else(|| "YouTube Video Analysis".to_string())
}

pub fn is_debug_mode() -> bool {
    parse_flag(get_env_var("DEBUG_MODE").as_deref())
}

pub fn parse_flag(value: Option<&str>) -> bool {
    value
        .map(|v| v.trim().eq_ignore_ascii_case("true") || v.trim() == "1")
        .unwrap_or(false)
}
