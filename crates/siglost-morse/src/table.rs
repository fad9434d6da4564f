use phf::phf_map;

static MORSE_TABLE: phf::Map<char, &'static str> = phf_map! {
    'A' => ".-",
    'B' => "-...",
    'C' => "-.-.",
    'D' => "-..",
    'E' => ".",
    'F' => "..-.",
    'G' => "--.",
    'H' => "....",
    'I' => "..",
    'J' => ".---",
    'K' => "-.-",
    'L' => ".-..",
    'M' => "--",
    'N' => "-.",
    'O' => "---",
    'P' => ".--.",
    'Q' => "--.-",
    'R' => ".-.",
    'S' => "...",
    'T' => "-",
    'U' => "..-",
    'V' => "...-",
    'W' => ".--",
    'X' => "-..-",
    'Y' => "-.--",
    'Z' => "--..",
    '0' => "-----",
    '1' => ".----",
    '2' => "..---",
    '3' => "...--",
    '4' => "....-",
    '5' => ".....",
    '6' => "-....",
    '7' => "--...",
    '8' => "---..",
    '9' => "----.",
    '.' => ".-.-.-",
    ',' => "--..--",
    '?' => "..--..",
    '\'' => ".----.",
    '!' => "-.-.--",
    '/' => "-..-.",
    '(' => "-.--.",
    ')' => "-.--.-",
    '&' => ".-...",
    ':' => "---...",
    ';' => "-.-.-.",
    '=' => "-...-",
    '+' => ".-.-.",
    '-' => "-....-",
    '_' => "..--.-",
    '"' => ".-..-.",
    '$' => "...-..-",
    '@' => ".--.-.",
};

/// Look up the dot/dash pattern for a character, ignoring ASCII case.
pub fn pattern_for(ch: char) -> Option<&'static str> {
    MORSE_TABLE.get(&ch.to_ascii_uppercase()).copied()
}

/// Render text the way the sequence strip shows it: one pattern per
/// character separated by spaces, with `/` standing in for a word break.
/// Unmapped characters are dropped.
pub fn morse_string(text: &str) -> String {
    let mut out = String::new();
    for ch in text.chars() {
        let pattern = if ch == ' ' {
            "/"
        } else {
            match pattern_for(ch) {
                Some(pattern) => pattern,
                None => continue,
            }
        };
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(pattern);
    }
    out
}
