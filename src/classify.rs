//! Keyword-based message categorizer.
//!
//! Rules are an ordered table evaluated top to bottom; the first match wins
//! and nothing is combined or scored. Matching is lower-cased substring
//! containment, so "codigo" also matches inside a longer token. A message
//! that matches no rule lands in [`Category::Outros`].

use std::fmt;

/// The closed set of classification labels. Each maps to one directory under
/// the output root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Banco,
    DocumentosFiscais,
    Livros,
    Compras,
    CodigoTrampo,
    Guitarra,
    Ufs,
    Newsletter,
    Outros,
}

impl Category {
    /// All labels, in rule-priority order with the fallback last.
    pub const ALL: [Category; 9] = [
        Category::Banco,
        Category::DocumentosFiscais,
        Category::Livros,
        Category::Compras,
        Category::CodigoTrampo,
        Category::Guitarra,
        Category::Ufs,
        Category::Newsletter,
        Category::Outros,
    ];

    /// The directory label for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Banco => "banco",
            Category::DocumentosFiscais => "documentos_fiscais",
            Category::Livros => "livros",
            Category::Compras => "compras",
            Category::CodigoTrampo => "codigo_trampo",
            Category::Guitarra => "guitarra",
            Category::Ufs => "ufs",
            Category::Newsletter => "newsletter",
            Category::Outros => "outros",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classification rule: keyword lists per field, any hit assigns the
/// category.
struct Rule {
    subject: &'static [&'static str],
    sender: &'static [&'static str],
    body: &'static [&'static str],
    category: Category,
}

/// The rule table, in strict priority order.
const RULES: &[Rule] = &[
    Rule {
        subject: &[],
        sender: &["inter", "itau", "caixa", "bb.com"],
        body: &[],
        category: Category::Banco,
    },
    Rule {
        subject: &["nota fiscal", "nf-e", "fatura", "boleto"],
        sender: &[],
        body: &[],
        category: Category::DocumentosFiscais,
    },
    Rule {
        subject: &["livro"],
        sender: &[],
        body: &[],
        category: Category::Livros,
    },
    Rule {
        subject: &["pedido", "compra", "rastreamento"],
        sender: &["amazon", "mercadolivre", "magazineluiza"],
        body: &[],
        category: Category::Compras,
    },
    Rule {
        subject: &["github", "trampo", "codigo"],
        sender: &["github", "linkedin", "googleaistudio"],
        body: &[],
        category: Category::CodigoTrampo,
    },
    Rule {
        subject: &["guitar", "tab", "solo"],
        sender: &["ultimateguitar"],
        body: &[],
        category: Category::Guitarra,
    },
    Rule {
        subject: &["exercicio", "ia", "ufs", "noticia"],
        sender: &["sigaa", "ufs"],
        body: &[],
        category: Category::Ufs,
    },
    Rule {
        subject: &[],
        sender: &[],
        body: &["unsubscribe", "descadastre"],
        category: Category::Newsletter,
    },
];

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

/// Classify a message by subject, sender and body.
///
/// Inputs are lower-cased before matching; callers pass empty strings for
/// absent fields. Always returns exactly one label and never fails.
pub fn classify(subject: &str, sender: &str, body: &str) -> Category {
    let subject = subject.to_lowercase();
    let sender = sender.to_lowercase();
    let body = body.to_lowercase();

    for rule in RULES {
        if contains_any(&subject, rule.subject)
            || contains_any(&sender, rule.sender)
            || contains_any(&body, rule.body)
        {
            return rule.category;
        }
    }

    Category::Outros
}
