use fibre_di::{Constructor, Container, TypeDescriptor, TypeKey};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

static CONNECTIONS: AtomicUsize = AtomicUsize::new(0);

struct DatabasePool {
  id: usize,
}

impl DatabasePool {
  fn connect() -> Self {
    let id = CONNECTIONS.fetch_add(1, Ordering::SeqCst) + 1;
    println!("--> Opening database pool #{}", id);
    DatabasePool { id }
  }
}

struct UserRepository {
  pool: Arc<DatabasePool>,
}

fn main() {
  let container = Arc::new(Container::new());
  container
    .declare(
      TypeDescriptor::class(TypeKey::of::<DatabasePool>())
        .constructor(Constructor::new(|_| Ok(DatabasePool::connect()))),
    )
    .declare(
      TypeDescriptor::class(TypeKey::of::<UserRepository>()).constructor(
        Constructor::new(|args| {
          Ok(UserRepository {
            pool: args.get::<DatabasePool>(0)?,
          })
        })
        .param(TypeKey::of::<DatabasePool>()),
      ),
    );

  let pool = TypeKey::of::<DatabasePool>();
  let repository = TypeKey::of::<UserRepository>();
  container.add_singleton(pool.clone(), pool).unwrap();
  container.add_per_call(repository.clone(), repository).unwrap();

  // Many threads resolve at once; the pool is still opened a single time.
  let handles: Vec<_> = (0..8)
    .map(|_| {
      let container = Arc::clone(&container);
      thread::spawn(move || container.get::<UserRepository>(None).unwrap())
    })
    .collect();

  let repositories: Vec<Arc<UserRepository>> =
    handles.into_iter().map(|h| h.join().unwrap()).collect();

  for (i, repo) in repositories.iter().enumerate() {
    println!("Repository {} uses pool #{}", i, repo.pool.id);
    assert!(Arc::ptr_eq(&repo.pool, &repositories[0].pool));
  }
  assert_eq!(CONNECTIONS.load(Ordering::SeqCst), 1);
}
