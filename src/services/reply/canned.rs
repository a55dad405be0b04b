//! Deterministic canned replies

/// Build the canned reply for a submitted message.
pub fn craft_reply(message: &str) -> String {
    let canned = [
        "I see...",
        "That's an interesting way to look at it.",
        "To get straight to the point,",
        "there are three things that matter here:",
        "1) a clear goal,",
        "2) small iterations,",
        "3) folding feedback back in.",
        "That's my suggestion.",
    ]
    .join(" ");
    format!("Thoughts on \"{}\": {}", message, canned)
}

/// Split text into alternating word and whitespace runs, so concatenating
/// the chunks reproduces the input byte for byte.
pub fn split_chunks(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut in_whitespace = None;

    for ch in text.chars() {
        let is_ws = ch.is_whitespace();
        if in_whitespace != Some(is_ws) && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }
        in_whitespace = Some(is_ws);
        current.push(ch);
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenation_reproduces_input() {
        let text = "  hello   world\nthis is\t\ta test ";
        let chunks = split_chunks(text);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn words_and_whitespace_alternate() {
        let chunks = split_chunks("one  two three");
        assert_eq!(chunks, vec!["one", "  ", "two", " ", "three"]);
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        assert!(split_chunks("").is_empty());
    }

    #[test]
    fn reply_embeds_the_message() {
        let reply = craft_reply("hello");
        assert!(reply.contains("\"hello\""));
        // Same message, same reply.
        assert_eq!(reply, craft_reply("hello"));
    }
}
