#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

#[macro_export]
macro_rules! rule {
    (
        id: $id:expr,
        description: $desc:expr
        $(, examples: [ $($example:expr),* $(,)? ])?
        $(, visual: $visual:expr)?
        $(, flags: $flags:expr)?
        , check: |$pw:tt, $ctx:tt| $body:block
        $(,)?
    ) => {{
        $crate::Rule {
            id: $id,
            description: $crate::Description::from($desc),
            predicate: |$pw: &str, $ctx: &$crate::Context| -> bool { $body },
            examples: &[ $($($example),*)? ],
            visual: { None::<&'static str> $(.or(Some($visual)))? },
            flags: { $crate::RuleFlags::empty() $(| $flags)? },
        }
    }};
}
