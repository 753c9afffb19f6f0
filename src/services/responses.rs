use crate::models::Intent;

pub fn template_for(intent: Intent, message: &str) -> String {
    let message = message.trim();

    match intent {
        Intent::CreateApp => "✅ **Vamos criar um app!**\n\n\
             Para começar, me diga:\n\
             - Qual é o objetivo do app? (ex: lista de tarefas, cadastro de clientes)\n\
             - Quais funcionalidades ele precisa ter?\n\
             - Você já tem algum código ou ideia?\n\n\
             ⚠️ Evite começar pelo visual: defina primeiro os dados e o fluxo principal.\n\n\
             Com essas informações, posso te guiar passo a passo com código editável no GitHub."
            .to_string(),

        Intent::SchedulePost => "📅 **Agendamento de postagens**\n\n\
             Use a página **'Agendador de Postagens'** no menu lateral para:\n\
             - Escolher a plataforma (Instagram, TikTok, Facebook, Shopify Blog)\n\
             - Definir o tipo de conteúdo\n\
             - Selecionar os horários (ex: 09:00, 15:00, 21:00)\n\n\
             ⚠️ Lembre-se: este é um agendamento lógico. A execução automática real exige um servidor ativo 24/7."
            .to_string(),

        Intent::Monetization => "💰 **Monetização e afiliados**\n\n\
             Você pode integrar estas plataformas ao seu funil:\n\
             - **ClickBank**: produtos digitais internacionais\n\
             - **Hotmart**: cursos e e-books (disponível em Portugal)\n\
             - **Digistore24**: foco na Europa (Alemanha)\n\n\
             ⚠️ Não espalhe links de afiliado sem contexto: recomende apenas o que combina com o seu público.\n\n\
             Quer que eu mostre como criar uma página de recomendações no Shopify com links de afiliado?"
            .to_string(),

        Intent::Help => format!(
            "🆘 **Ajuda prática**\n\n\
             Você escreveu: \"{message}\"\n\n\
             Estou aqui para orientar com soluções reais. Por favor, especifique:\n\
             - O que você está tentando fazer?\n\
             - Onde está travando?\n\
             - Qual é o resultado esperado?\n\n\
             Exemplo: 'Minha taxa de checkout no Shopify é baixa, o que ajustar?'"
        ),

        Intent::Settings => "⚙️ **Configurações**\n\n\
             A página de configurações está em desenvolvimento.\n\n\
             Por enquanto, você pode:\n\
             - Salvar credenciais na página **'Credenciais'** (as senhas ficam apenas em variáveis de ambiente)\n\
             - Salvar agendamentos na página dedicada\n\
             - Gerenciar seu histórico de conversas\n\n\
             O que você gostaria de configurar?"
            .to_string(),

        Intent::General => format!(
            "Olá! Sou a **MSSP**, sua consultora técnica em Shopify, dropshipping e automações.\n\n\
             Recebi: \"{message}\"\n\n\
             Fale diretamente o que precisa:\n\
             - Criar um app\n\
             - Agendar postagens\n\
             - Monetizar com afiliados\n\
             - Resolver um problema técnico\n\n\
             Estou aqui para entregar orientação clara e aplicável."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_intent_has_distinct_template() {
        let intents = [
            Intent::CreateApp,
            Intent::SchedulePost,
            Intent::Monetization,
            Intent::Help,
            Intent::Settings,
            Intent::General,
        ];
        let texts: Vec<String> = intents.iter().map(|i| template_for(*i, "x")).collect();
        for (i, a) in texts.iter().enumerate() {
            assert!(!a.is_empty());
            for b in texts.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_general_and_help_echo_message() {
        assert!(template_for(Intent::General, "  bom dia  ").contains("\"bom dia\""));
        assert!(template_for(Intent::Help, "socorro").contains("\"socorro\""));
        assert!(!template_for(Intent::Monetization, "lucro rápido").contains("lucro rápido"));
    }

    #[test]
    fn test_templates_are_deterministic() {
        assert_eq!(
            template_for(Intent::SchedulePost, "agendar"),
            template_for(Intent::SchedulePost, "agendar")
        );
    }
}
