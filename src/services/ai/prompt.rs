use super::Message;

pub const END_OF_TURN: &str = "</s>";

pub const SYSTEM_PROMPT: &str = "Você é a MSSP, uma consultora técnica para vendedores de e-commerce \
(Shopify, dropshipping, automações e marketing em redes sociais). Responda sempre em português, \
de forma clara e prática, com passos concretos. Não faça promessas irreais de ganhos nem invente \
funcionalidades que não existem.";

/// Instruction-tuned prompt: the system text and the conversation folded into
/// `[INST]` blocks, assistant turns closed with the end-of-turn marker.
pub fn build_instruct_prompt(system_prompt: &str, messages: &[Message]) -> String {
    let mut prompt = String::from("<s>");
    let mut pending_system = Some(system_prompt);

    for msg in messages {
        if msg.role == "assistant" {
            prompt.push_str(&msg.content);
            prompt.push_str(END_OF_TURN);
            continue;
        }

        prompt.push_str("[INST] ");
        if let Some(system) = pending_system.take() {
            prompt.push_str(system);
            prompt.push_str("\n\n");
        }
        prompt.push_str(&msg.content);
        prompt.push_str(" [/INST]");
    }

    prompt
}
