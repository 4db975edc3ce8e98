/// Generates a traced client method that sends one request variant and awaits
/// its oneshot reply.
///
/// A closed mailbox and a dropped responder both surface as
/// `ActorCommunicationError`.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, CatalogError> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender
                    .send($request::$variant {
                        $($param,)*
                        respond_to,
                    })
                    .await
                    .map_err(|_| CatalogError::ActorCommunicationError("Actor closed".to_string()))?;

                response
                    .await
                    .map_err(|_| CatalogError::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}
