//! Declarative keyword rule tables.
//!
//! Review text is pt-BR, so every keyword list is too. All heuristic logic
//! lives here as data; the scanner and classifiers consume it generically.

/// A named recurring theme mined from same-sentiment comments.
pub struct ThemeRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

/// A highlight/problem annotation rule: the comment must match at least one
/// keyword from every group.
pub struct AnnotationRule {
    pub label: &'static str,
    pub groups: &'static [&'static [&'static str]],
}

// ---------------------------------------------------------------
// Comment categorization (ordered, first match wins)
// ---------------------------------------------------------------

pub const SERVICE_CATEGORY: &[&str] = &[
    "atendimento",
    "funcionário",
    "vendedor",
    "vendedora",
    "equipe",
    "pessoal",
    "atendente",
    "atenderam",
    "ajudaram",
    "cordial",
    "prestativo",
    "educado",
];

pub const ENVIRONMENT_CATEGORY: &[&str] = &[
    "ambiente",
    "limpeza",
    "organização",
    "organizado",
    "estrutura",
    "local",
    "espaço",
];

/// Adjectives that only count as Ambiente alongside "loja" ("loja limpa");
/// standalone they are too generic and would steal later buckets.
pub const ENVIRONMENT_STORE_QUALIFIERS: &[&str] = &["limpa", "organizada", "arrumada"];

pub const WAIT_TIME_CATEGORY: &[&str] = &[
    "espera",
    "esperar",
    "fila",
    "demora",
    "rápido",
    "rapidez",
    "lento",
    "demorou",
    "demorado",
];

pub const PRODUCTS_CATEGORY: &[&str] = &[
    "produto",
    "qualidade",
    "variedade",
    "estoque",
    "marca",
    "tamanho",
    "tamanhos",
    "disponível",
    "disponibilidade",
    "opções",
    "opcao",
];

pub const PRICES_CATEGORY: &[&str] = &[
    "preço",
    "preco",
    "valor",
    "caro",
    "barato",
    "promoção",
    "promocao",
    "desconto",
    "competitivo",
    "econômico",
    "economico",
];

// ---------------------------------------------------------------
// Recurring perception themes
// ---------------------------------------------------------------

/// Scanned over rating >= 4 comments.
pub const POSITIVE_THEMES: &[ThemeRule] = &[
    ThemeRule {
        name: "Brand Variety",
        keywords: &[
            "nike",
            "adidas",
            "puma",
            "under armour",
            "variedade",
            "marcas",
            "seleção",
            "opções",
            "produtos",
            "departamentos",
        ],
    },
    ThemeRule {
        name: "Product Quality",
        keywords: &[
            "qualidade",
            "bom produto",
            "durabilidade",
            "material",
            "fabricação",
            "resistente",
            "excelente qualidade",
            "alta qualidade",
        ],
    },
    ThemeRule {
        name: "Structure & Organization",
        keywords: &[
            "organizado",
            "limpo",
            "estrutura",
            "moderno",
            "amplo",
            "espaçoso",
            "bem organizado",
            "arrumado",
            "ambiente",
        ],
    },
    ThemeRule {
        name: "Helpful Service",
        keywords: &[
            "atendimento",
            "atendente",
            "vendedor",
            "prestativo",
            "educado",
            "simpático",
            "atencioso",
            "ajudou",
            "atendeu bem",
            "caloroso",
            "gentil",
        ],
    },
    ThemeRule {
        name: "Easy Exchanges",
        keywords: &[
            "troca",
            "trocas",
            "devolução",
            "política",
            "fácil trocar",
            "aceita troca",
            "trocou",
            "online",
        ],
    },
];

/// Scanned over rating <= 3 comments.
pub const NEGATIVE_THEMES: &[ThemeRule] = &[
    ThemeRule {
        name: "High Prices",
        keywords: &[
            "caro",
            "preço alto",
            "muito caro",
            "caríssimo",
            "caro demais",
            "preço",
            "barato",
            "metade do preço",
            "mais barato",
            "online",
        ],
    },
    ThemeRule {
        name: "Slow or Indifferent Service",
        keywords: &[
            "atendimento ruim",
            "atendimento péssimo",
            "lento",
            "desinteressado",
            "má vontade",
            "ignorou",
            "não atendeu",
            "deixou esperando",
            "conversando",
            "funcionários",
            "vendedores",
            "deplorável",
            "terrível",
        ],
    },
    ThemeRule {
        name: "Operational Errors",
        keywords: &[
            "erro",
            "tamanho errado",
            "cor errada",
            "produto errado",
            "não entregou",
            "não entregue",
            "falta",
            "sem estoque",
            "produto não",
            "nunca entregou",
            "protocolo",
        ],
    },
];

/// Theme whose matches are additionally scanned for severe cases.
pub const OPERATIONAL_ERRORS_THEME: &str = "Operational Errors";

/// Delivery-failure keywords that mark a severe operational case.
pub const SEVERE_CASE_KEYWORDS: &[&str] =
    &["não entregou", "nunca entregou", "não entregue", "protocolo"];

// ---------------------------------------------------------------
// Store deep-analysis aspects
// ---------------------------------------------------------------

pub const STRUCTURE_ASPECT: &[&str] = &[
    "organizado",
    "limpo",
    "estrutura",
    "moderno",
    "amplo",
    "espaçoso",
    "bem organizado",
];

pub const SERVICE_NEGATIVE_ASPECT: &[&str] = &[
    "atendimento ruim",
    "atendimento péssimo",
    "lento",
    "desinteressado",
    "má vontade",
    "ignorou",
    "não atendeu",
    "deplorável",
    "terrível",
    "conversando",
    "funcionários",
    "vendedores",
];

pub const SERVICE_POSITIVE_ASPECT: &[&str] = &[
    "atendimento bom",
    "atendimento excelente",
    "prestativo",
    "educado",
    "simpático",
    "atencioso",
    "caloroso",
    "gentil",
];

pub const POLICY_ASPECT: &[&str] = &["política", "troca", "trocas", "devolução", "políticas"];

pub const POLICY_NEGATIVE_ASPECT: &[&str] = &["absurda", "restritiva", "problemática", "ruim"];

pub const OPERATIONS_ASPECT: &[&str] = &[
    "erro",
    "tamanho errado",
    "cor errada",
    "produto errado",
    "não entregou",
    "não entregue",
    "falta",
    "sem estoque",
    "produto não",
    "nunca entregou",
];

// ---------------------------------------------------------------
// Regional enrichment annotations
// ---------------------------------------------------------------

/// Scanned over a top-tier store's rating >= 4 comments.
pub const HIGHLIGHT_RULES: &[AnnotationRule] = &[
    AnnotationRule {
        label: "Standout service",
        groups: &[&["atendimento"], &["bom", "excelente"]],
    },
    AnnotationRule {
        label: "Good product variety",
        groups: &[&["variedade", "opções"]],
    },
    AnnotationRule {
        label: "Competitive prices",
        groups: &[&["preço"], &["bom", "competitivo"]],
    },
    AnnotationRule {
        label: "Organized environment",
        groups: &[&["organizado", "limpo"]],
    },
    AnnotationRule {
        label: "Easy exchanges",
        groups: &[&["troca"], &["fácil", "aceita"]],
    },
    AnnotationRule {
        label: "Well-stocked",
        groups: &[&["estoque"], &["bom"]],
    },
];

/// Scanned over a worst/opportunity store's rating <= 3 comments.
pub const PROBLEM_RULES: &[AnnotationRule] = &[
    AnnotationRule {
        label: "Problematic service",
        groups: &[&["atendimento"], &["ruim", "péssimo"]],
    },
    AnnotationRule {
        label: "High prices",
        groups: &[&["preço"], &["caro", "alto"]],
    },
    AnnotationRule {
        label: "Stock shortages",
        groups: &[&["estoque"], &["falta", "sem"]],
    },
    AnnotationRule {
        label: "Operational errors",
        groups: &[&["erro", "não entregou"]],
    },
    AnnotationRule {
        label: "Restrictive policies",
        groups: &[&["política"], &["ruim", "restritiva"]],
    },
];
