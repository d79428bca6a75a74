use bounce_core::model::UserProfile;
use dioxus::prelude::*;

use crate::context::AppContext;

/// The signed-in learner, kept current from the identity channel.
pub(crate) fn use_current_user() -> Signal<Option<UserProfile>> {
    let identity = use_context::<AppContext>().identity();
    let mut user = use_signal(|| identity.current());
    use_future(move || {
        let mut rx = identity.subscribe();
        async move {
            while rx.changed().await.is_ok() {
                let latest = rx.borrow_and_update().clone();
                user.set(latest);
            }
        }
    });
    user
}
