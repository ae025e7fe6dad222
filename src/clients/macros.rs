/// Generates a [`FormClient`](crate::clients::FormClient) method that sends
/// one [`FormRequest`](crate::messages::FormRequest) variant and awaits its
/// reply.
///
/// ```ignore
/// client_method!(FormClient => fn reset() -> () as FormRequest::Reset);
/// ```
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[tracing::instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $crate::error::FormError> {
                tracing::debug!("Sending request");
                let (respond_to, response) = tokio::sync::oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| $crate::error::FormError::ActorCommunicationError("Actor closed".to_string()))?;

                response
                    .await
                    .map_err(|_| $crate::error::FormError::ActorCommunicationError("Actor dropped".to_string()))
            }
        }
    };
}
