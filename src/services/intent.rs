use crate::models::Intent;

/// Ordered keyword rules. The first rule with a keyword contained in the
/// normalized message wins, so earlier rules take precedence: a message with
/// both "ajuda" and "agendar" is a `SchedulePost`.
pub const INTENT_RULES: &[(Intent, &[&str])] = &[
    (
        Intent::CreateApp,
        &["criar app", "fazer app", "construir app", "app de", "aplicativo"],
    ),
    (
        Intent::SchedulePost,
        &[
            "agendar",
            "postagem",
            "postar",
            "redes sociais",
            "instagram",
            "tiktok",
            "facebook",
            "horário",
            "agenda",
        ],
    ),
    (
        Intent::Monetization,
        &[
            "monetizar",
            "ganhar dinheiro",
            "vender",
            "afiliado",
            "comissão",
            "clickbank",
            "hotmart",
            "lucro",
            "receita",
            "vendas",
        ],
    ),
    (
        Intent::Help,
        &[
            "ajuda",
            "como fazer",
            "não sei",
            "me ajuda",
            "duvida",
            "dúvida",
            "orientação",
        ],
    ),
    (
        Intent::Settings,
        &[
            "configuração",
            "configurar",
            "ajustar",
            "preferência",
            "opção",
            "config",
        ],
    ),
];

pub fn classify(message: &str) -> Intent {
    let normalized = message.trim().to_lowercase();

    INTENT_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| normalized.contains(k)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::General)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_category_messages() {
        let cases = [
            ("Quero criar app para minha loja", Intent::CreateApp),
            ("tenho uma ideia de aplicativo", Intent::CreateApp),
            ("Preciso postar no Instagram amanhã", Intent::SchedulePost),
            ("qual o melhor horário?", Intent::SchedulePost),
            ("Como monetizar meu blog?", Intent::Monetization),
            ("quero ser afiliado da Hotmart", Intent::Monetization),
            ("Me ajuda com o checkout", Intent::Help),
            ("tenho uma dúvida", Intent::Help),
            ("quero ajustar uma preferência", Intent::Settings),
            ("abrir config", Intent::Settings),
        ];

        for (message, expected) in cases {
            assert_eq!(classify(message), expected, "message: {message}");
        }
    }

    #[test]
    fn test_fallback_is_general() {
        assert_eq!(classify("Olá, tudo bem?"), Intent::General);
        assert_eq!(classify(""), Intent::General);
        assert_eq!(classify("   "), Intent::General);
    }

    #[test]
    fn test_normalizes_case_and_whitespace() {
        assert_eq!(classify("   AGENDAR   "), Intent::SchedulePost);
        assert_eq!(classify("DÚVIDA"), Intent::Help);
    }

    #[test]
    fn test_precedence_follows_rule_order() {
        // help vs schedule_post
        assert_eq!(classify("preciso de ajuda para agendar"), Intent::SchedulePost);
        // create_app vs monetization
        assert_eq!(classify("quero vender meu aplicativo"), Intent::CreateApp);
        // schedule_post vs monetization
        assert_eq!(classify("postar para aumentar vendas"), Intent::SchedulePost);
        // monetization vs settings
        assert_eq!(classify("configurar comissão"), Intent::Monetization);
        // help vs settings
        assert_eq!(classify("não sei configurar"), Intent::Help);
    }

    #[test]
    fn test_every_keyword_maps_to_its_own_rule_or_an_earlier_one() {
        for (position, (intent, keywords)) in INTENT_RULES.iter().enumerate() {
            for keyword in *keywords {
                let got = classify(keyword);
                let got_position = INTENT_RULES
                    .iter()
                    .position(|(i, _)| *i == got)
                    .unwrap();
                assert!(
                    got == *intent || got_position < position,
                    "keyword {keyword:?} classified as {got:?}"
                );
            }
        }
    }
}
