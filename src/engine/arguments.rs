//! `$ARGUMENTS` and `$1`..`$9` placeholder substitution.

/// Replace `$ARGUMENTS` with the space-joined argument list, then each of
/// `$1` through `$9` with the matching positional argument or the empty
/// string. Every position is substituted, present or not.
pub fn substitute(body: &str, args: &[String]) -> String {
    let mut result = body.replace("$ARGUMENTS", &args.join(" "));

    for index in 1..=9usize {
        let placeholder = format!("${index}");
        let value = args.get(index - 1).map(String::as_str).unwrap_or("");
        result = result.replace(&placeholder, value);
    }

    result
}
