use serverlink_core::Request;

/// Invocation metadata the Lambda runtime attached to the incoming event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LambdaRequestContext {
    /// AWS request id of the invocation.
    pub request_id: Option<String>,
    /// ARN of the function being invoked.
    pub function_arn: Option<String>,
}

impl LambdaRequestContext {
    pub fn from_lambda(context: &lambda_http::Context) -> Self {
        Self {
            request_id: non_empty(&context.request_id),
            function_arn: non_empty(&context.invoked_function_arn),
        }
    }

    pub fn insert(request: &mut Request, context: LambdaRequestContext) {
        request.extensions_mut().insert(context);
    }

    pub fn get(request: &Request) -> Option<&LambdaRequestContext> {
        request.extensions().get::<LambdaRequestContext>()
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
