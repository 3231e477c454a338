//! Chat panel: greeting, message ids, delayed replies and teardown.

use finshield_core::{
    chat::{ChatPanel, Sender},
    config::ShieldConfig,
    keyword_responder::ResponseTopic,
    panel::Panel,
    types::Language,
};
use std::sync::Arc;
use std::time::Duration;

fn panel(language: Language, delay: Duration) -> ChatPanel {
    let config = ShieldConfig::builtin().unwrap().with_latency(delay, delay);
    ChatPanel::new(Arc::new(config), language)
}

#[test]
fn session_opens_with_greeting() {
    let chat = panel(Language::Kk, Duration::ZERO);
    let messages = chat.messages();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].id, 1);
    assert_eq!(messages[0].sender, Sender::Assistant);
    assert!(messages[0].text.starts_with("Сәлем! Мен FinAI"));
}

#[test]
fn blank_input_is_ignored() {
    let mut chat = panel(Language::Ru, Duration::ZERO);
    chat.set_input("   \n\t");
    assert!(!chat.can_send());
    assert!(chat.send(Language::Ru).is_none());
    assert_eq!(chat.messages().len(), 1);
    assert!(!chat.is_typing());
}

#[test]
fn send_with_default_latency_outside_runtime() {
    let mut chat = ChatPanel::new(Arc::new(ShieldConfig::builtin().unwrap()), Language::Ru);
    chat.set_input("хочу накопить");
    assert!(chat.send(Language::Ru).is_some());
    assert!(chat.is_typing());
    assert_eq!(chat.teardown(), 1);
}

#[tokio::test]
async fn reply_follows_user_message() {
    let mut chat = panel(Language::Ru, Duration::from_millis(10));
    chat.set_input("Где я больше всего трачу?");
    let sent = chat.send(Language::Ru).expect("sent").clone();
    assert_eq!(sent.id, 2);
    assert_eq!(sent.sender, Sender::User);
    assert_eq!(chat.input(), "", "input clears on send");
    assert!(chat.is_typing());

    let (topic, reply) = chat.receive_reply().await.expect("reply");
    assert_eq!(topic, ResponseTopic::Spending);
    assert_eq!(reply.id, 3);
    assert_eq!(reply.sender, Sender::Assistant);
    assert!(!chat.is_typing());
}

/// Ids increase with every appended message, so id order is time order.
#[tokio::test]
async fn ids_are_unique_and_increasing() {
    let mut chat = panel(Language::Ru, Duration::from_millis(5));
    chat.set_input("хочу накопить");
    chat.send(Language::Ru);
    chat.set_input("дай совет");
    chat.send(Language::Ru);
    assert_eq!(chat.pending_replies(), 2);

    let (first, _) = chat.receive_reply().await.expect("first reply");
    let (second, _) = chat.receive_reply().await.expect("second reply");
    assert_eq!(first, ResponseTopic::Savings);
    assert_eq!(second, ResponseTopic::Tips);

    let ids: Vec<u64> = chat.messages().iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    for pair in chat.messages().windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
}

#[tokio::test]
async fn suggestions_fill_the_input() {
    let mut chat = panel(Language::Kk, Duration::ZERO);
    assert_eq!(chat.suggestions(Language::Kk).len(), 4);
    assert!(chat.use_suggestion(Language::Kk, 3));
    assert_eq!(chat.input(), "Үнемдеу бойынша кеңестер");
    assert!(!chat.use_suggestion(Language::Kk, 4));

    let reply = chat.ask(Language::Kk, "Үнемдеу бойынша кеңестер").await.expect("reply");
    assert!(reply.text.starts_with("Міне үнемдеу үшін"));
}

/// An earlier reply still pending is delivered first; ask returns its own.
#[tokio::test]
async fn ask_returns_the_reply_to_its_own_question() {
    let mut chat = panel(Language::Ru, Duration::from_millis(5));
    chat.set_input("хочу накопить");
    chat.send(Language::Ru);

    let reply = chat.ask(Language::Ru, "дай совет").await.expect("reply");
    assert!(reply.text.starts_with("Вот мои топ-советы"));
    assert_eq!(reply.id, 5);
    assert!(!chat.is_typing());

    let savings = &chat.messages()[3];
    assert_eq!(savings.sender, Sender::Assistant);
    assert!(savings.text.starts_with("Отличный вопрос! Вот твой план"));
}

#[tokio::test]
async fn teardown_cancels_pending_replies() {
    let mut chat = panel(Language::Ru, Duration::from_secs(30));
    chat.set_input("проверка мошенничества");
    chat.send(Language::Ru);
    chat.set_input("случайный текст");
    chat.send(Language::Ru);

    assert_eq!(chat.teardown(), 2);
    assert!(!chat.is_typing());
    assert!(chat.receive_reply().await.is_none());
    assert_eq!(chat.messages().len(), 3, "no assistant reply after teardown");
}

#[test]
fn time_label_is_hours_and_minutes() {
    let chat = panel(Language::Ru, Duration::ZERO);
    let label = chat.messages()[0].time_label();
    assert_eq!(label.len(), 5);
    assert_eq!(&label[2..3], ":");
}
