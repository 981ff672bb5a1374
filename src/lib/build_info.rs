pub fn git_commit_hash() -> &'static str {
    match option_env!("QUILL_WEB_GIT_SHA") {
        Some(value) if !value.is_empty() => value,
        _ => "unknown",
    }
}

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
