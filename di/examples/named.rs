use fibre_di::{global, resolve, Constructor, TypeDescriptor, TypeKey};
use std::sync::Arc;

// --- Abstraction and Implementations ---
trait MessageSender: Send + Sync {
  fn send(&self, to: &str, message: &str) -> String;
}

struct EmailSender;
impl MessageSender for EmailSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending email to {}: '{}'", to, message)
  }
}

struct SmsSender;
impl MessageSender for SmsSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending SMS to {}: '{}'", to, message)
  }
}

fn main() {
  let sender = TypeKey::of::<dyn MessageSender>();

  // --- Declaration ---
  global()
    .declare(TypeDescriptor::interface(sender.clone()))
    .declare(
      TypeDescriptor::class(TypeKey::of::<EmailSender>())
        .implements(sender.clone())
        .constructor(Constructor::new(|_| Ok(EmailSender)))
        .view::<dyn MessageSender, EmailSender>(|s| -> Arc<dyn MessageSender> { s }),
    )
    .declare(
      TypeDescriptor::class(TypeKey::of::<SmsSender>())
        .implements(sender.clone())
        .constructor(Constructor::new(|_| Ok(SmsSender)))
        .view::<dyn MessageSender, SmsSender>(|s| -> Arc<dyn MessageSender> { s }),
    );

  // --- Registration ---
  global()
    .add_singleton_with_name("email", sender.clone(), TypeKey::of::<EmailSender>())
    .unwrap();
  global()
    .add_singleton_with_name("sms", sender.clone(), TypeKey::of::<SmsSender>())
    .unwrap();

  // --- Resolution ---
  let email = resolve!(trait MessageSender, "email");
  let sms = resolve!(trait MessageSender, "sms");

  let result1 = email.send("test@example.com", "Hello from Fibre!");
  let result2 = sms.send("+123456789", "Hello from Fibre!");
  println!("{}", result1);
  println!("{}", result2);
  assert!(result1.contains("email"));
  assert!(result2.contains("SMS"));

  // Without a name the first registration wins.
  let default = resolve!(trait MessageSender);
  assert!(default.send("a", "b").contains("email"));

  // Every registration at once, in registration order.
  let all = global().get_all_trait::<dyn MessageSender>().unwrap();
  println!("{} senders registered", all.len());
}
