//! Whole-page behavior through synthetic user actions.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use medi_diagnosis_ui::chat::outcome::{CONNECTION_ERROR_REPLY, SERVER_ERROR_REPLY};
use medi_diagnosis_ui::chat::widget::{GREETING, HIDDEN_CLASS};
use medi_diagnosis_ui::chat::{ChatMessage, ChatReply, ChatTransport, TransportError};
use medi_diagnosis_ui::config::AppConfig;
use medi_diagnosis_ui::ui::dom::{Document, ElementId, SelectedFile};
use medi_diagnosis_ui::ui::markup;
use medi_diagnosis_ui::utilities::forms::REQUIRED_ALERT;
use medi_diagnosis_ui::Page;

/// Rule-based stand-in for the site's chatbot endpoint.
#[derive(Debug, Default)]
struct FakeChatbot {
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl ChatTransport for FakeChatbot {
    async fn exchange(&self, message: &str) -> Result<ChatReply, TransportError> {
        self.calls.lock().unwrap().push(message.to_string());
        match message {
            "crash" => Ok(ChatReply::ServerError(serde_json::json!(true))),
            "offline" => Err(TransportError::Unavailable("connection refused".into())),
            _ => Ok(ChatReply::Response("Hi there".to_string())),
        }
    }
}

struct Fixture {
    page: Page,
    bot: Arc<FakeChatbot>,
    flash: ElementId,
    form: ElementId,
    name: ElementId,
    age: ElementId,
    upload: ElementId,
    upload_label: ElementId,
}

/// A diagnosis page: flash, a form with vitals and an upload, and the chat widget.
fn load_page() -> Fixture {
    let mut doc = Document::new();
    let body = doc.body();

    let flash = markup::flash_message(&mut doc, body, "Diagnosis saved");

    let form = doc.append_new(body, "form");
    let name = markup::input(&mut doc, form, "text");
    doc.set_attribute(name, "required", "");
    let age = markup::input(&mut doc, form, "number");
    doc.set_attribute(age, "required", "");
    doc.set_attribute(age, "min", "0");
    doc.set_attribute(age, "max", "10");
    let upload = markup::input(&mut doc, form, "file");
    let upload_label = doc.append_new(form, "small");

    markup::chat_widget(&mut doc, body);

    let bot = Arc::new(FakeChatbot::default());
    let page = Page::load(doc, bot.clone(), &AppConfig::default());
    Fixture {
        page,
        bot,
        flash,
        form,
        name,
        age,
        upload,
        upload_label,
    }
}

#[tokio::test]
async fn test_chat_round_trip() {
    let fx = load_page();
    let widget = fx.page.chat().expect("chat widget mounted").clone();
    let els = widget.elements();

    fx.page.click(els.toggle).settle().await;
    assert_eq!(widget.messages(), vec![ChatMessage::bot(GREETING)]);

    fx.page.type_into(els.input, "hello");
    fx.page.click(els.send).settle().await;

    fx.page.type_into(els.input, "crash");
    fx.page.press_key(els.input, "Enter").settle().await;

    fx.page.type_into(els.input, "offline");
    fx.page.press_key(els.input, "Enter").settle().await;

    fx.page.type_into(els.input, "   ");
    fx.page.press_key(els.input, "Enter").settle().await;

    assert_eq!(
        widget.messages(),
        vec![
            ChatMessage::bot(GREETING),
            ChatMessage::user("hello"),
            ChatMessage::bot("Hi there"),
            ChatMessage::user("crash"),
            ChatMessage::bot(SERVER_ERROR_REPLY),
            ChatMessage::user("offline"),
            ChatMessage::bot(CONNECTION_ERROR_REPLY),
        ]
    );
    assert_eq!(fx.bot.calls.lock().unwrap().len(), 3);

    fx.page.click(els.close).settle().await;
    fx.page.click(els.toggle).settle().await;
    assert_eq!(widget.messages().len(), 7);

    let doc = fx.page.document().lock();
    assert!(!doc.has_class(els.window, HIDDEN_CLASS));
    assert_eq!(doc.scroll_top(els.messages), 7);
}

#[tokio::test]
async fn test_page_without_chat_markup_still_binds_utilities() {
    let mut doc = Document::new();
    let body = doc.body();
    let age = markup::input(&mut doc, body, "number");
    doc.set_attribute(age, "max", "120");

    let page = Page::load(doc, Arc::new(FakeChatbot::default()), &AppConfig::default());
    assert!(page.chat().is_none());

    page.type_into(age, "300");
    assert_eq!(page.document().lock().value(age), "120");
}

#[tokio::test]
async fn test_form_submission_gate() {
    let fx = load_page();
    let doc = fx.page.document().clone();

    fx.page.type_into(fx.age, "5");
    assert!(!fx.page.submit(fx.form));
    {
        let d = doc.lock();
        assert_eq!(d.style(fx.name, "border-color"), Some("red"));
        assert_eq!(d.style(fx.age, "border-color"), None);
        assert_eq!(d.alerts(), [REQUIRED_ALERT]);
    }

    fx.page.type_into(fx.name, "Asha");
    assert!(fx.page.submit(fx.form));
    let d = doc.lock();
    assert_eq!(d.style(fx.name, "border-color"), None);
    assert_eq!(d.alerts().len(), 1);
}

#[tokio::test]
async fn test_numeric_clamp_on_edit() {
    let fx = load_page();
    for (typed, shown) in [("-5", "0"), ("15", "10"), ("5", "5")] {
        fx.page.type_into(fx.age, typed);
        assert_eq!(fx.page.document().lock().value(fx.age), shown);
    }
}

#[tokio::test]
async fn test_upload_gate() {
    let fx = load_page();
    let doc = fx.page.document().clone();

    fx.page
        .select_files(fx.upload, vec![SelectedFile::new("mri.dcm", 17 * 1024 * 1024)]);
    {
        let mut d = doc.lock();
        assert_eq!(d.take_alerts(), vec!["File size exceeds 16MB limit".to_string()]);
        assert!(d.files(fx.upload).is_empty());
        assert_eq!(d.text(fx.upload_label), "");
    }

    fx.page
        .select_files(fx.upload, vec![SelectedFile::new("chest.png", 1024 * 1024)]);
    let d = doc.lock();
    assert!(d.alerts().is_empty());
    assert_eq!(d.text(fx.upload_label), "Selected: chest.png (1.00 MB)");
}

#[tokio::test(start_paused = true)]
async fn test_flash_message_lifecycle() {
    let start = tokio::time::Instant::now();
    let mut fx = load_page();
    let doc = fx.page.document().clone();

    tokio::time::sleep_until(start + Duration::from_millis(4999)).await;
    assert_eq!(doc.lock().style(fx.flash, "opacity"), None);

    tokio::time::sleep_until(start + Duration::from_millis(5001)).await;
    assert_eq!(doc.lock().style(fx.flash, "opacity"), Some("0"));
    assert!(doc.lock().is_connected(fx.flash));

    fx.page.settle_flashes().await;
    assert!(!doc.lock().is_connected(fx.flash));
    assert!(tokio::time::Instant::now() >= start + Duration::from_millis(5300));
}
