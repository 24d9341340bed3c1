//! Built-in curated knowledge base
//!
//! Loaded once at process start. Reloads always start from a fresh copy of
//! this set, so an entry here disappears only when a reload overrides it.

use once_cell::sync::Lazy;

use super::base::KnowledgeBase;
use super::entry::{Entry, Suggestion};

static BUILTIN: Lazy<KnowledgeBase> = Lazy::new(build_builtin);

/// The immutable built-in knowledge base
pub fn builtin_knowledge_base() -> &'static KnowledgeBase {
    &BUILTIN
}

fn build_builtin() -> KnowledgeBase {
    let mut kb = KnowledgeBase::new();

    // Agricultura
    kb.insert(
        "assistência técnica",
        Entry::new(
            [
                "Oferecemos assistência técnica agrícola gratuita para produtores cadastrados.",
                "Para solicitar assistência técnica, você precisa preencher o formulário de cadastro.",
            ],
            2.0,
        )
        .with_suggestions(vec![Suggestion::new(
            "Solicitar Assistência",
            "Solicitar Assistência",
        )]),
    );
    kb.insert(
        "análise de solo",
        Entry::new(
            [
                "Realizamos análise de solo gratuita para produtores cadastrados.",
                "O kit para coleta de solo está disponível na nossa sede.",
            ],
            2.0,
        )
        .with_action("fluxoAgricultura"),
    );
    kb.insert(
        "mecanização",
        Entry::new(
            [
                "Nosso programa de mecanização agrícola oferece serviços de preparo do solo, plantio e colheita.",
                "Para solicitar o serviço de mecanização, é necessário estar cadastrado no sistema.",
            ],
            2.0,
        )
        .with_action("fluxoAgricultura"),
    );
    kb.insert(
        "caf",
        Entry::new(
            [
                "O CAF (Cadastro Nacional da Agricultura Familiar) dá acesso às políticas públicas para agricultores familiares.",
                "Para emitir o CAF, compareça à secretaria com documento de identidade, CPF e comprovante de residência.",
            ],
            3.0,
        )
        .with_suggestions(vec![Suggestion::new("Emitir CAF", "fluxoCAF")])
        .with_action("fluxoCAF"),
    );

    // Pesca
    kb.insert(
        "licenciamento pesca",
        Entry::new(
            [
                "O licenciamento para atividade pesqueira requer documentação específica.",
                "Podemos ajudar com todo processo de licenciamento ambiental para pesca.",
            ],
            3.0,
        )
        .with_suggestions(vec![Suggestion::new("Formulário de Pesca", "Pré-Cadastro")]),
    );
    kb.insert(
        "piscicultura",
        Entry::new(
            [
                "Oferecemos suporte técnico para criação de peixes em tanques e açudes.",
                "Nossa equipe pode auxiliar com orientações sobre manejo, alimentação e comercialização.",
            ],
            3.0,
        )
        .with_action("fluxoPesca"),
    );

    // PAA
    kb.insert(
        "vender para o governo",
        Entry::new(
            [
                "Através do PAA, você pode vender seus produtos diretamente para instituições públicas.",
                "O Programa de Aquisição de Alimentos (PAA) garante preços justos para agricultores familiares.",
            ],
            3.0,
        )
        .with_action("fluxoPAA"),
    );

    // Genéricos
    kb.insert(
        "horário de atendimento",
        Entry::new(
            [
                "Atendemos de segunda a sexta, das 8h às 14h.",
                "Nosso horário de funcionamento é das 8h às 14h, exceto feriados.",
            ],
            1.0,
        ),
    );
    kb.insert(
        "endereço",
        Entry::new(
            [
                "Estamos localizados na Av. Principal, nº 500, Centro, Vitória do Xingu/PA.",
                "Nossa sede fica na avenida principal da cidade, próximo à prefeitura.",
            ],
            1.0,
        ),
    );
    kb.insert(
        "contato",
        Entry::new(
            [
                "Você pode entrar em contato pelo telefone (99) 3333-4444 ou pelo email semapa@prefeitura.gov.br",
                "Para falar com nossa equipe, ligue (99) 3333-4444 ou envie um email.",
            ],
            1.0,
        ),
    );

    kb
}
