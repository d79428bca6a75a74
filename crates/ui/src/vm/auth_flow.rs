//! Steps of the sign-in panel: login, register by emailed code, and password
//! reset by emailed code. Validation runs here before any request is sent.

pub const OTP_LENGTH: usize = 6;
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AuthStep {
    #[default]
    Login,
    RegisterEmail,
    RegisterOtp,
    RegisterDetails,
    ForgotEmail,
    ForgotOtp,
    ForgotNewPassword,
    ResetDone,
}

impl AuthStep {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            AuthStep::Login => "Sign in",
            AuthStep::RegisterEmail => "Create account",
            AuthStep::RegisterOtp | AuthStep::ForgotOtp => "Verify email",
            AuthStep::RegisterDetails => "Complete registration",
            AuthStep::ForgotEmail => "Reset password",
            AuthStep::ForgotNewPassword => "New password",
            AuthStep::ResetDone => "Password updated",
        }
    }

    /// The step a back button returns to; `None` on the login step.
    #[must_use]
    pub fn back(self) -> Option<Self> {
        match self {
            AuthStep::Login => None,
            AuthStep::RegisterEmail | AuthStep::ForgotEmail | AuthStep::ResetDone => {
                Some(AuthStep::Login)
            }
            AuthStep::RegisterOtp => Some(AuthStep::RegisterEmail),
            AuthStep::RegisterDetails => Some(AuthStep::RegisterOtp),
            AuthStep::ForgotOtp => Some(AuthStep::ForgotEmail),
            AuthStep::ForgotNewPassword => Some(AuthStep::ForgotOtp),
        }
    }
}

/// # Errors
///
/// Returns a user-facing message when `email` is not `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Please enter your email");
    }
    let valid = !email.chars().any(char::is_whitespace)
        && email.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        });
    if valid {
        Ok(())
    } else {
        Err("Please enter a valid email address")
    }
}

/// # Errors
///
/// Returns a user-facing message unless `otp` is exactly six digits.
pub fn validate_otp(otp: &str) -> Result<(), &'static str> {
    let otp = otp.trim();
    if otp.len() == OTP_LENGTH && otp.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err("Please enter a valid 6-digit code")
    }
}

/// # Errors
///
/// Returns a user-facing message when a field is empty, the passwords differ
/// or the password is too short.
pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), &'static str> {
    if password.is_empty() || confirm.is_empty() {
        return Err("Please fill in all fields");
    }
    if password != confirm {
        return Err("Passwords do not match");
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters");
    }
    Ok(())
}

/// # Errors
///
/// Same as [`validate_new_password`], plus an empty name.
pub fn validate_registration(name: &str, password: &str, confirm: &str) -> Result<(), &'static str> {
    if name.trim().is_empty() {
        return Err("Please fill in all fields");
    }
    validate_new_password(password, confirm)
}

/// Where to go when the service rejects a registration or reset: back to the
/// code step when the code was the problem, otherwise stay.
#[must_use]
pub fn step_after_rejection(step: AuthStep, message: &str) -> AuthStep {
    if !message.to_lowercase().contains("otp") {
        return step;
    }
    match step {
        AuthStep::RegisterDetails => AuthStep::RegisterOtp,
        AuthStep::ForgotNewPassword => AuthStep::ForgotOtp,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape_is_checked() {
        assert!(validate_email("ada@example.com").is_ok());
        assert_eq!(validate_email("  "), Err("Please enter your email"));
        for bad in ["ada", "ada@", "@x.io", "ada@example", "a b@x.io", "a@b@c.io"] {
            assert!(validate_email(bad).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn otp_must_be_six_digits() {
        assert!(validate_otp("123456").is_ok());
        assert!(validate_otp("12345").is_err());
        assert!(validate_otp("12345a").is_err());
    }

    #[test]
    fn passwords_must_match_and_be_long_enough() {
        assert_eq!(validate_new_password("secret", "secreT"), Err("Passwords do not match"));
        assert_eq!(
            validate_new_password("abc", "abc"),
            Err("Password must be at least 6 characters")
        );
        assert!(validate_new_password("secret", "secret").is_ok());
        assert_eq!(
            validate_registration(" ", "secret", "secret"),
            Err("Please fill in all fields")
        );
    }

    #[test]
    fn rejected_code_returns_to_code_step() {
        let message = "request failed with status 400: Invalid or expired OTP";
        assert_eq!(
            step_after_rejection(AuthStep::RegisterDetails, message),
            AuthStep::RegisterOtp
        );
        assert_eq!(
            step_after_rejection(AuthStep::ForgotNewPassword, message),
            AuthStep::ForgotOtp
        );
        assert_eq!(
            step_after_rejection(AuthStep::RegisterDetails, "server error"),
            AuthStep::RegisterDetails
        );
    }

    #[test]
    fn back_walks_the_flow_in_reverse() {
        assert_eq!(AuthStep::ForgotNewPassword.back(), Some(AuthStep::ForgotOtp));
        assert_eq!(AuthStep::RegisterEmail.back(), Some(AuthStep::Login));
        assert_eq!(AuthStep::Login.back(), None);
    }
}
