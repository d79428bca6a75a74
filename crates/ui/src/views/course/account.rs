use bounce_core::model::UserProfile;
use dioxus::prelude::*;
use services::api::VerifyOtpRequest;
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::views::user::use_current_user;
use crate::vm::{
    AuthStep, step_after_rejection, validate_email, validate_new_password, validate_otp,
    validate_registration,
};

#[component]
pub(super) fn ProfileOverlay() -> Element {
    let user = use_current_user();
    let current = user.read().clone();
    match current {
        Some(profile) => rsx! { ProfileCard { profile } },
        None => rsx! { AuthPanel {} },
    }
}

#[component]
fn ProfileCard(profile: UserProfile) -> Element {
    let ctx = use_context::<AppContext>();

    // Pick up name or avatar changes made elsewhere.
    let cached = profile.clone();
    let (auth, identity) = (ctx.auth(), ctx.identity());
    use_future(move || {
        let (auth, identity, cached) = (auth.clone(), identity.clone(), cached.clone());
        async move {
            let Some(remote) = auth.get_user_by_email(&cached.email).await else {
                return;
            };
            let latest = UserProfile::from(remote);
            if latest != cached {
                debug!(email = %latest.email, "cached profile refreshed");
                if let Err(err) = identity.sign_in(latest).await {
                    warn!(error = %err, "could not cache refreshed profile");
                }
            }
        }
    });

    let identity = ctx.identity();
    rsx! {
        div { class: "profile",
            span { class: "profile-initials", "{profile.initials()}" }
            h3 { "{profile.name}" }
            p { "{profile.email}" }
            button {
                r#type: "button",
                onclick: move |_| {
                    let identity = identity.clone();
                    spawn(async move {
                        if let Err(err) = identity.sign_out().await {
                            warn!(error = %err, "sign out failed");
                        }
                    });
                },
                "Sign out"
            }
        }
    }
}

/// Login, registration by emailed code, and password reset.
#[component]
fn AuthPanel() -> Element {
    let ctx = use_context::<AppContext>();
    let mut step = use_signal(AuthStep::default);
    let mut email = use_signal(String::new);
    let mut otp = use_signal(String::new);
    let mut name = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut confirm = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut notice = use_signal(|| None::<String>);
    let mut busy = use_signal(|| false);

    let mut go = move |next: AuthStep| {
        error.set(None);
        step.set(next);
    };

    let submit = move |_: MouseEvent| {
        if busy() {
            return;
        }
        let current = step();
        let (auth, identity) = (ctx.auth(), ctx.identity());
        let address = email().trim().to_string();
        let code = otp().trim().to_string();

        let checked = match current {
            AuthStep::Login | AuthStep::RegisterEmail | AuthStep::ForgotEmail => {
                validate_email(&address)
            }
            AuthStep::RegisterOtp | AuthStep::ForgotOtp => validate_otp(&code),
            AuthStep::RegisterDetails => validate_registration(&name(), &password(), &confirm()),
            AuthStep::ForgotNewPassword => validate_new_password(&password(), &confirm()),
            AuthStep::ResetDone => Ok(()),
        };
        if let Err(message) = checked {
            error.set(Some(message.to_string()));
            return;
        }

        match current {
            AuthStep::RegisterOtp => return go(AuthStep::RegisterDetails),
            AuthStep::ForgotOtp => return go(AuthStep::ForgotNewPassword),
            AuthStep::ResetDone => return go(AuthStep::Login),
            _ => {}
        }

        error.set(None);
        busy.set(true);
        let (display_name, secret) = (name().trim().to_string(), password());
        spawn(async move {
            let outcome: Result<Option<AuthStep>, String> = match current {
                AuthStep::Login => match auth.login(&address, &secret).await {
                    Ok(response) => identity
                        .sign_in(response.into())
                        .await
                        .map(|()| None)
                        .map_err(|err| err.to_string()),
                    Err(err) => {
                        warn!(error = %err, "login failed");
                        Err("Login failed. Check your email and password.".into())
                    }
                },
                AuthStep::RegisterEmail => {
                    if auth.check_email_exists(&address).await {
                        Err("An account with this email already exists. Sign in instead.".into())
                    } else {
                        match auth.send_otp(&address).await {
                            Ok(_) => {
                                notice.set(Some(format!("Code sent to {address}. Check your inbox!")));
                                Ok(Some(AuthStep::RegisterOtp))
                            }
                            Err(err) => Err(err.to_string()),
                        }
                    }
                }
                AuthStep::RegisterDetails => {
                    let request = VerifyOtpRequest {
                        email: address,
                        otp: code,
                        name: Some(display_name),
                        password: Some(secret),
                    };
                    match auth.verify_otp(&request).await {
                        Ok(response) => identity
                            .sign_in(response.into())
                            .await
                            .map(|()| None)
                            .map_err(|err| err.to_string()),
                        Err(err) => Err(err.to_string()),
                    }
                }
                AuthStep::ForgotEmail => match auth.forgot_password(&address).await {
                    Ok(_) => {
                        notice.set(Some(format!("Reset code sent to {address}")));
                        Ok(Some(AuthStep::ForgotOtp))
                    }
                    Err(err) => Err(err.to_string()),
                },
                AuthStep::ForgotNewPassword => {
                    match auth.reset_password(&address, &code, &secret).await {
                        Ok(_) => {
                            notice.set(Some("Password reset. You can now sign in.".into()));
                            Ok(Some(AuthStep::ResetDone))
                        }
                        Err(err) => Err(err.to_string()),
                    }
                }
                AuthStep::RegisterOtp | AuthStep::ForgotOtp | AuthStep::ResetDone => Ok(None),
            };
            busy.set(false);
            match outcome {
                Ok(Some(next)) => step.set(next),
                Ok(None) => {}
                Err(message) => {
                    let next = step_after_rejection(current, &message);
                    if next != current {
                        otp.set(String::new());
                        step.set(next);
                    }
                    error.set(Some(message));
                }
            }
        });
    };

    let current = step();
    let label = submit_label(current);
    rsx! {
        div { class: "auth",
            if let Some(previous) = current.back() {
                button {
                    class: "auth-back",
                    r#type: "button",
                    onclick: move |_| go(previous),
                    "← Back"
                }
            }
            h3 { "{current.title()}" }
            if let Some(message) = notice() {
                p { class: "notice", "{message}" }
            }
            match current {
                AuthStep::Login | AuthStep::RegisterEmail | AuthStep::ForgotEmail => rsx! {
                    input {
                        r#type: "email",
                        placeholder: "Email",
                        value: "{email}",
                        oninput: move |evt| email.set(evt.value()),
                    }
                },
                AuthStep::RegisterOtp | AuthStep::ForgotOtp => rsx! {
                    input {
                        inputmode: "numeric",
                        maxlength: 6,
                        placeholder: "6-digit code",
                        value: "{otp}",
                        oninput: move |evt| otp.set(evt.value()),
                    }
                },
                _ => rsx! {},
            }
            if current == AuthStep::RegisterDetails {
                input {
                    placeholder: "Name",
                    value: "{name}",
                    oninput: move |evt| name.set(evt.value()),
                }
            }
            if current == AuthStep::Login {
                input {
                    r#type: "password",
                    placeholder: "Password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
            }
            if matches!(current, AuthStep::RegisterDetails | AuthStep::ForgotNewPassword) {
                input {
                    r#type: "password",
                    placeholder: "New password",
                    value: "{password}",
                    oninput: move |evt| password.set(evt.value()),
                }
                input {
                    r#type: "password",
                    placeholder: "Confirm password",
                    value: "{confirm}",
                    oninput: move |evt| confirm.set(evt.value()),
                }
            }
            if let Some(message) = error() {
                p { class: "error", "{message}" }
            }
            button {
                class: "primary",
                r#type: "button",
                disabled: busy(),
                onclick: submit,
                "{label}"
            }
            if current == AuthStep::Login {
                div { class: "auth-links",
                    button { r#type: "button", onclick: move |_| go(AuthStep::RegisterEmail), "Create account" }
                    button { r#type: "button", onclick: move |_| go(AuthStep::ForgotEmail), "Forgot password?" }
                }
            }
        }
    }
}

fn submit_label(step: AuthStep) -> &'static str {
    match step {
        AuthStep::Login => "Sign in",
        AuthStep::RegisterEmail | AuthStep::ForgotEmail => "Send code",
        AuthStep::RegisterOtp | AuthStep::ForgotOtp => "Verify code",
        AuthStep::RegisterDetails => "Create account",
        AuthStep::ForgotNewPassword => "Reset password",
        AuthStep::ResetDone => "Back to sign in",
    }
}
