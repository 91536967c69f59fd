use crate::input::UserInput;

#[test]
fn slash_commands() {
    assert_eq!(UserInput::parse("/quit"), UserInput::Quit);
    assert_eq!(UserInput::parse("/q\n"), UserInput::Quit);
    assert_eq!(UserInput::parse("/2"), UserInput::Press(2));
    assert_eq!(UserInput::parse("/lang es"), UserInput::SetLang("es".into()));
}

#[test]
fn everything_else_is_search_text() {
    assert_eq!(UserInput::parse("漢字"), UserInput::Search("漢字".into()));
    assert_eq!(UserInput::parse(""), UserInput::Search(String::new()));
    assert_eq!(UserInput::parse(" /1"), UserInput::Search(" /1".into()));
}

#[test]
fn malformed_commands_are_unknown() {
    for line in ["/", "/0", "/lang", "/quit now", "/frobnicate"] {
        assert!(matches!(UserInput::parse(line), UserInput::Unknown(_)), "{line}");
    }
}
