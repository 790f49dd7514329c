/// Checks that `()`, `{}` and `[]` in a selector string are balanced and
/// properly nested. Every other character is ignored.
///
/// This is a syntactic guard only; it knows nothing of formula grammar.
///
/// # Examples
///
/// ```
/// use appsheet_client::is_query_string_valid;
///
/// assert!(is_query_string_valid("FILTER(Products, [Price] > 100)"));
/// assert!(!is_query_string_valid("({[string]}"));
/// assert!(!is_query_string_valid("({[]}]"));
/// ```
pub fn is_query_string_valid(input: &str) -> bool {
    let mut stack: Vec<char> = Vec::new();

    for ch in input.chars() {
        match ch {
            '(' | '{' | '[' => stack.push(ch),
            ')' | '}' | ']' => {
                if stack.last().copied().and_then(closer_for) != Some(ch) {
                    return false;
                }
                stack.pop();
            }
            _ => {}
        }
    }

    stack.is_empty()
}

fn closer_for(opener: char) -> Option<char> {
    match opener {
        '(' => Some(')'),
        '{' => Some('}'),
        '[' => Some(']'),
        _ => None,
    }
}
