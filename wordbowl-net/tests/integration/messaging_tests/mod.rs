mod test_allow_list_delivery;
mod test_broadcast_exclusion;
mod test_client_message_reaches_host;
