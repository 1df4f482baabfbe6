//! Label and query normalization.

/// Case-insensitive, whitespace-trimmed canonical form used at every tier.
pub fn canon(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Map accented vowels to their unaccented equivalents.
pub fn fold_accents(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'Á' | 'À' | 'Â' | 'Ä' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'Ó' | 'Ò' | 'Ô' | 'Ö' => 'O',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            other => other,
        })
        .collect()
}

/// URL-safe slug: lowercase, accents stripped, spaces to hyphens, other
/// non-alphanumerics dropped.
pub fn slugify(text: &str) -> String {
    let folded = fold_accents(&canon(text));
    let mut slug = String::with_capacity(folded.len());
    for part in folded.split_whitespace() {
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.extend(part.chars().filter(|c| c.is_ascii_alphanumeric() || *c == '-'));
    }
    slug
}
