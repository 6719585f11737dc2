//! ドメイン定数とプロンプト組み立て

/// 引数省略時に送る既定のプロンプト
///
/// タンク水位のしきい値で2本のパイプを制御するStructured Textプログラムの生成依頼。
pub const DEFAULT_PROMPT: &str = "Generate an IEC 61131-3 Structured Text program that \
controls pipe A and pipe B: turn on pipe A when the tank level reaches 70%, and turn on \
pipe B when the tank level reaches 80%.";

/// 位置引数からプロンプトを組み立てる。引数が無ければ既定のプロンプトを使う
pub fn prompt_from_args(args: &[String]) -> String {
    let joined = args.join(" ");
    if joined.trim().is_empty() {
        DEFAULT_PROMPT.to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_args_use_default_prompt() {
        assert_eq!(prompt_from_args(&[]), DEFAULT_PROMPT);
    }

    #[test]
    fn test_whitespace_args_use_default_prompt() {
        let args = vec!["  ".to_string()];
        assert_eq!(prompt_from_args(&args), DEFAULT_PROMPT);
    }

    #[test]
    fn test_words_are_joined() {
        let args = vec!["hello".to_string(), "world".to_string()];
        assert_eq!(prompt_from_args(&args), "hello world");
    }

    #[test]
    fn test_default_prompt_mentions_both_pipes() {
        assert!(DEFAULT_PROMPT.contains("pipe A"));
        assert!(DEFAULT_PROMPT.contains("pipe B"));
        assert!(DEFAULT_PROMPT.contains("70%"));
        assert!(DEFAULT_PROMPT.contains("80%"));
    }
}
