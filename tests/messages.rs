#[cfg(test)]
mod tests {
    use camwatch::libs::messages::Message;
    use camwatch::msg_error_anyhow;

    #[test]
    fn test_error_built_from_message_keeps_text() {
        let err = msg_error_anyhow!(Message::UnknownArchiveStatus("bogus".to_string()));
        let text = err.to_string();
        assert!(text.contains("Unknown archive status: bogus"));
        assert!(text.contains("ENQUEUED"));
    }

    #[test]
    fn test_api_key_message_names_the_env_var() {
        assert!(Message::ApiKeyMissing.to_string().contains("CAMWATCH_API_KEY"));
    }
}
