//! # Pages
//!
//! HTML for the landing page and the checkout redirect page.

use shop_core::CheckoutSession;

/// Landing page body
pub fn landing_page() -> &'static str {
    "hello"
}

/// Page that hands the session to Stripe.js and redirects the buyer.
///
/// Values are embedded as JSON string literals.
pub fn checkout_page(session: &CheckoutSession) -> String {
    let publishable_key = serde_json::Value::from(session.publishable_key.as_str());
    let session_id = serde_json::Value::from(session.session_id.as_str());

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Redirecting to checkout</title>
    <script src="https://js.stripe.com/v3/"></script>
</head>
<body style="font-family: system-ui; display: flex; justify-content: center; align-items: center; height: 100vh; margin: 0;">
    <div style="text-align: center;">
        <p>Redirecting to checkout...</p>
        <p id="error" style="color: #c00;"></p>
    </div>
    <script>
        var stripe = Stripe({publishable_key});
        stripe.redirectToCheckout({{ sessionId: {session_id} }}).then(function (result) {{
            if (result.error) {{
                document.getElementById("error").textContent = result.error.message;
            }}
        }});
    </script>
</body>
</html>
"#
    )
}
