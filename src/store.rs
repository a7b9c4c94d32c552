use std::collections::HashMap;
use std::sync::Arc;

use time::Date;
use tokio::sync::{Mutex, RwLock};

use crate::domain::ledger::DailyLedger;
use crate::onboarding::machine::Onboarding;

/// Продукт найден, ждём от пользователя граммовку. Живёт не дольше одного
/// следующего числового сообщения; новый поиск молча заменяет старый.
#[derive(Debug, Clone)]
pub struct PendingFoodEntry {
    pub name: String,
    pub calories_per_100g: f64,
}

/// Всё состояние одного пользователя на время жизни процесса.
#[derive(Debug)]
pub struct UserSession {
    pub ledger: DailyLedger,
    pub onboarding: Option<Onboarding>,
    pub pending_food: Option<PendingFoodEntry>,
}

impl UserSession {
    fn new(today: Date) -> Self {
        Self {
            ledger: DailyLedger::new(today),
            onboarding: None,
            pending_food: None,
        }
    }
}

/// Процессная карта user_id → сессия. Внешний RwLock защищает саму карту,
/// мьютекс на сессии сериализует операции одного пользователя; разные
/// пользователи друг друга не блокируют.
#[derive(Clone, Default)]
pub struct UserStore {
    inner: Arc<RwLock<HashMap<i64, Arc<Mutex<UserSession>>>>>,
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get_or_create(&self, user_id: i64, today: Date) -> Arc<Mutex<UserSession>> {
        if let Some(session) = self.inner.read().await.get(&user_id) {
            return Arc::clone(session);
        }
        let mut map = self.inner.write().await;
        Arc::clone(
            map.entry(user_id)
                .or_insert_with(|| Arc::new(Mutex::new(UserSession::new(today)))),
        )
    }
}
