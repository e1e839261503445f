//! Initial configuration written for agents that have none yet.

/// Default configuration for a freshly registered agent.
///
/// The auth token is a placeholder; the operator replaces it with the token
/// issued for the agent.
pub fn initial_config(agent_id: &str, agent_name: &str) -> String {
    format!(
        r"[agent]
Agent-ID = {agent_id}
Agent-Name = {agent_name}
AUTH-Token = REDACTED

[backend-api]
base-api = http://localhost:5000
base-endpoint = /api/v1/

[proxy]
proxy-url = None
proxy-auth = None

[adlab.local]
Username = ADLAB\ldapuser
Password = UserPass1234!
LDAP-username = ldapuser@adlab.local
LDAP-query = (&(objectCategory=computer)(operatingSystem=*Windows*))
Max-size = 5M
Num-of-threads = 10
Spider-depth = 2
Excluded-shares = PRINT$ ADMIN$ BACKUP
Extensions = pfx p12 pem key
Excluded-extensions = zip exe tar
Content-regex = ((secret|password|credentials|.*passe)\s{{0,1}}[:=]\S*)
File-regex = (secret|password|credentials|.*passe)
LDAP=389
LDAPS=636
AUTH-Method=NTLM

[query_get_all_windows_servers]
filter = (objectCategory=computer)
attributes = cn, operatingSystem
scope = subtree
base=

[query_get_all_users]
filter = (objectClass=user)
attributes = sAMAccountName, displayName
scope =
base=

[query_get_all_groups]
filter = (&(objectClass=group)(member=*))
attributes = sAMAccountName, displayName, description, member, memberOf, whenCreated, whenChanged
scope = subtree
base="
    )
}
